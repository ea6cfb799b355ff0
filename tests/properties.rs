use quickcheck::{quickcheck, TestResult};

use crate::util::re;

/// Patterns drawn from for the properties below, with a simple predicate
/// over the input that must agree with `is_match`.
fn oracle(index: usize) -> (&'static str, fn(&str) -> bool) {
    const ORACLES: &[(&str, fn(&str) -> bool)] = &[
        ("(a|b)*", only_a_and_b),
        ("[0-9]+", digits),
        ("a*b", a_star_b),
        ("(ab)*", ab_repeated),
        ("x?y?", x_then_y),
    ];
    ORACLES[index % ORACLES.len()]
}

fn only_a_and_b(s: &str) -> bool {
    s.chars().all(|c| c == 'a' || c == 'b')
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn a_star_b(s: &str) -> bool {
    s.ends_with('b') && s[..s.len() - 1].chars().all(|c| c == 'a')
}

fn ab_repeated(s: &str) -> bool {
    s.len() % 2 == 0 && s.as_bytes().chunks(2).all(|pair| pair == b"ab")
}

fn x_then_y(s: &str) -> bool {
    matches!(s, "" | "x" | "y" | "xy")
}

/// Map arbitrary bytes onto a small alphabet so matches actually happen.
fn small_alphabet(bytes: &[u8]) -> String {
    const ALPHABET: &[char] = &['a', 'b', 'x', 'y', '0', '9'];
    bytes.iter().map(|&b| ALPHABET[b as usize % ALPHABET.len()]).collect()
}

quickcheck! {
    fn is_match_agrees_with_oracle(index: usize, bytes: Vec<u8>) -> bool {
        let (pattern, expected) = oracle(index);
        let input = small_alphabet(&bytes);
        re(pattern).is_match(&input) == expected(&input)
    }

    fn compiling_twice_accepts_the_same_language(index: usize, input: String) -> bool {
        let (pattern, _) = oracle(index);
        re(pattern).is_match(&input) == re(pattern).is_match(&input)
    }

    fn found_text_is_a_full_match(index: usize, bytes: Vec<u8>) -> TestResult {
        let (pattern, _) = oracle(index);
        let haystack = small_alphabet(&bytes);
        let re = re(pattern);
        match re.find(&haystack) {
            None => TestResult::discard(),
            Some(m) => TestResult::from_bool(re.is_match(m.as_str())),
        }
    }

    fn full_match_is_found_at_zero(index: usize, bytes: Vec<u8>) -> TestResult {
        let (pattern, _) = oracle(index);
        let input = small_alphabet(&bytes);
        let re = re(pattern);
        if !re.is_match(&input) {
            return TestResult::discard();
        }
        let m = re.find(&input).unwrap();
        TestResult::from_bool(m.start() == 0 && m.end() == input.len())
    }

    fn star_of_literal_matches_repetitions(n: u8) -> bool {
        let input = "a".repeat(n as usize);
        re("a*").is_match(&input) && re("a+").is_match(&input) == (n > 0)
    }

    fn find_iter_matches_are_ordered_and_disjoint(bytes: Vec<u8>) -> bool {
        let haystack = small_alphabet(&bytes);
        let re = re("[0-9]+|a*");
        let mut last_end = 0;
        for m in re.find_iter(&haystack) {
            if m.start() < last_end {
                return false;
            }
            last_end = m.end();
        }
        true
    }
}

#[test]
fn empty_string_iff_nullable() {
    for pattern in ["a*", "(a|b)*", "a?b?", "(a+)?", "a+", "a", "(a|b*)c", "(a|b*)c?"] {
        let ast = regeng_syntax::parse_pattern(pattern).unwrap();
        assert_eq!(re(pattern).is_match(""), ast.is_nullable(), "pattern: {}", pattern);
    }
}
