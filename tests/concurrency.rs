use std::thread;

use once_cell::sync::Lazy;
use regeng::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new("([a-z]|[A-Z]|_)([a-z]|[A-Z]|[0-9])*").unwrap()
});

#[test]
fn regex_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Regex>();
}

#[test]
fn shared_regex_across_threads() -> anyhow::Result<()> {
    crate::util::init();
    let inputs = ["identifer", "_usr501132", "987c", "", "a_b", "Zz9"];
    let expected: Vec<bool> = inputs.iter().map(|s| IDENTIFIER.is_match(s)).collect();

    let results = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    inputs.iter().map(|s| IDENTIFIER.is_match(s)).collect::<Vec<bool>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow::anyhow!("matcher thread panicked")))
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    for result in results {
        assert_eq!(result, expected);
    }
    assert_eq!(expected, vec![true, true, false, false, false, true]);
    Ok(())
}

#[test]
fn clones_are_independent() -> anyhow::Result<()> {
    let re: Regex = "(a|b)*c".parse()?;
    let copy = re.clone();
    drop(re);
    assert!(copy.is_match("abc"));
    assert_eq!(copy.as_str(), "(a|b)*c");
    assert_eq!(copy.to_string(), "(a|b)*c");
    Ok(())
}
