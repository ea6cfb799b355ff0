use regeng::Regex;

/// Route `logging` output through the test harness.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compile `pattern`, panicking with the syntax error on failure.
pub fn re(pattern: &str) -> Regex {
    init();
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("failed to compile {:?}: {}", pattern, err),
    }
}
