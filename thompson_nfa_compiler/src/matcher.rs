use crate::nfa::{State, StateId, NFA};
use crate::sparse_set::SparseSet;

/// A matcher that simulates a Thompson NFA against input.
///
/// The matcher never backtracks. It keeps the set of states the NFA could be
/// in (the frontier) and advances all of them one character at a time, so a
/// search takes time proportional to `states * input length`.
#[derive(Debug)]
pub struct Matcher<'a> {
    nfa: &'a NFA,
}

/// The byte span of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub start: usize,
    pub end: usize,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a NFA) -> Self {
        Self { nfa }
    }

    /// Check if the entire input matches
    pub fn is_match(&self, input: &str) -> bool {
        let mut clist = SparseSet::new(self.nfa.len());
        let mut nlist = SparseSet::new(self.nfa.len());
        let mut stack = Vec::new();

        self.nfa.epsilon_closure(self.nfa.start, &mut clist, &mut stack);
        for ch in input.chars() {
            if clist.is_empty() {
                return false;
            }
            nlist.clear();
            for id in clist.iter() {
                if let State::Consume { pred, next } = *self.nfa.state(id) {
                    if pred.matches(ch) {
                        self.nfa.epsilon_closure(next, &mut nlist, &mut stack);
                    }
                }
            }
            std::mem::swap(&mut clist, &mut nlist);
        }
        self.nfa.is_accepting(&clist)
    }

    /// Find the leftmost-longest match in the input
    pub fn find(&self, input: &str) -> Option<MatchResult> {
        self.find_at(input, 0)
    }

    /// Find the leftmost-longest match starting the search at byte offset
    /// `start`.
    ///
    /// This is a single pass over the input. A new thread is started at each
    /// position until some thread reaches the match state. Every thread
    /// remembers where it started, and when two threads reach the same state
    /// the one that started first wins. Since later threads can never win,
    /// they are dropped once a match is known, and the search ends when no
    /// thread is left.
    ///
    /// Panics if `start` is not on a char boundary of `input`.
    pub fn find_at(&self, input: &str, start: usize) -> Option<MatchResult> {
        let mut clist = Threads::new(self.nfa.len());
        let mut nlist = Threads::new(self.nfa.len());
        let mut stack = Vec::new();
        let mut best: Option<MatchResult> = None;
        let mut chars = input[start..].chars();
        let mut at = start;

        loop {
            if best.is_none() {
                // Seeds go last, so older threads keep their claim on states.
                clist.add(self.nfa, self.nfa.start, at, &mut stack);
            }
            if let Some(origin) = clist.origin(self.nfa.accept) {
                best = Some(MatchResult { start: origin, end: at });
            }
            if clist.set.is_empty() {
                break;
            }
            let Some(ch) = chars.next() else { break };

            nlist.set.clear();
            for id in clist.set.iter() {
                let origin = clist.origins[id];
                if best.map_or(false, |m| origin > m.start) {
                    continue;
                }
                if let State::Consume { pred, next } = *self.nfa.state(id) {
                    if pred.matches(ch) {
                        nlist.add(self.nfa, next, origin, &mut stack);
                    }
                }
            }
            std::mem::swap(&mut clist, &mut nlist);
            at += ch.len_utf8();
            trace!("frontier at {}: {} states", at, clist.set.len());
        }
        best
    }
}

/// A frontier whose states each remember where their thread started.
#[derive(Debug)]
struct Threads {
    set: SparseSet,
    /// Indexed by state ID; only meaningful for states in `set`.
    origins: Vec<usize>,
}

impl Threads {
    fn new(capacity: usize) -> Threads {
        Threads { set: SparseSet::new(capacity), origins: vec![0; capacity] }
    }

    /// Add the epsilon closure of `id`, tagging new states with `origin`.
    fn add(
        &mut self,
        nfa: &NFA,
        id: StateId,
        origin: usize,
        stack: &mut Vec<StateId>,
    ) {
        let before = self.set.len();
        nfa.epsilon_closure(id, &mut self.set, stack);
        for id in self.set.iter().skip(before) {
            self.origins[id] = origin;
        }
    }

    fn origin(&self, id: StateId) -> Option<usize> {
        if self.set.contains(id) {
            Some(self.origins[id])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::nfa::{Hole, Predicate};
    use regeng_syntax::parse_pattern;

    fn nfa(pattern: &str) -> NFA {
        compile(&parse_pattern(pattern).unwrap()).unwrap()
    }

    fn find(pattern: &str, input: &str) -> Option<(usize, usize)> {
        let nfa = nfa(pattern);
        Matcher::new(&nfa).find(input).map(|m| (m.start, m.end))
    }

    #[test]
    fn test_simple_char_match() {
        let mut nfa = NFA::new();

        // Create NFA that matches "a"
        let a_state = nfa.consume(Predicate::Char('a'));
        let match_state = nfa.match_state();

        nfa.patch(&[Hole::out1(a_state)], match_state);
        nfa.start = a_state;

        let matcher = Matcher::new(&nfa);

        assert!(matcher.is_match("a"));
        assert!(!matcher.is_match("b"));
        assert!(!matcher.is_match("aa"));
        assert!(!matcher.is_match(""));
    }

    #[test]
    fn test_full_match() {
        let nfa = nfa("(a|b)*c");
        let matcher = Matcher::new(&nfa);
        assert!(matcher.is_match("baabac"));
        assert!(matcher.is_match("c"));
        assert!(!matcher.is_match("cabbba"));
        assert!(!matcher.is_match(""));
    }

    #[test]
    fn test_empty_input() {
        assert!(Matcher::new(&nfa("a*")).is_match(""));
        assert!(Matcher::new(&nfa("(a|b)*")).is_match(""));
        assert!(Matcher::new(&nfa("")).is_match(""));
        assert!(!Matcher::new(&nfa("")).is_match("a"));
        assert!(!Matcher::new(&nfa("a+")).is_match(""));
    }

    #[test]
    fn test_unicode_input() {
        let nfa = nfa("[α-ω]+é");
        let matcher = Matcher::new(&nfa);
        assert!(matcher.is_match("λμé"));
        assert!(!matcher.is_match("λμe"));
    }

    #[test]
    fn test_find_leftmost() {
        assert_eq!(find("a", "ba"), Some((1, 2)));
        assert_eq!(find("[0-9]+", "ab123c45"), Some((2, 5)));
        assert_eq!(find("[a-z][0-9]", "A1b2"), Some((2, 4)));
        assert_eq!(find("x", "abc"), None);
    }

    #[test]
    fn test_find_longest() {
        assert_eq!(find("a|ab", "xab"), Some((1, 3)));
        assert_eq!(find("(ab)+", "abababa"), Some((0, 6)));
        // A later-starting but longer match doesn't beat an earlier one.
        assert_eq!(find("ab|bcde", "abcde"), Some((0, 2)));
    }

    #[test]
    fn test_find_empty() {
        assert_eq!(find("a*", "bbb"), Some((0, 0)));
        assert_eq!(find("a*", "baa"), Some((0, 0)));
        assert_eq!(find("", ""), Some((0, 0)));
    }

    #[test]
    fn test_find_byte_offsets() {
        assert_eq!(find("b+", "ééb"), Some((4, 5)));
    }

    #[test]
    fn test_find_at() {
        let nfa = nfa("[0-9]+");
        let matcher = Matcher::new(&nfa);
        let m = matcher.find_at("12 34", 2).unwrap();
        assert_eq!((m.start, m.end), (3, 5));
    }
}
