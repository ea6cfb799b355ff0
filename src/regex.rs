use core::{fmt, ops::Range, str::FromStr};

use thompson_nfa_compiler::{Matcher, NFA};

use crate::{builder::RegexBuilder, error::Error};

/// A compiled regular expression.
///
/// A `Regex` owns its automaton, which never changes after compilation.
/// Every search allocates its own frontier, so a single `Regex` can be
/// shared between threads and searched concurrently without locking.
///
/// # Example
///
/// ```
/// use regeng::Regex;
///
/// let re = Regex::new("([a-z]|[A-Z]|_)([a-z]|[A-Z]|[0-9])*").unwrap();
/// assert!(re.is_match("_usr501132"));
/// assert!(!re.is_match("987c"));
/// ```
#[derive(Clone)]
pub struct Regex {
    pattern: String,
    nfa: NFA,
}

impl Regex {
    /// Compiles a regular expression with the default configuration.
    ///
    /// Once compiled, it can be used repeatedly to search or match. A
    /// malformed pattern returns [`Error::Syntax`].
    ///
    /// ```
    /// use regeng::Regex;
    ///
    /// assert!(Regex::new("(a|b)*c").is_ok());
    /// assert!(Regex::new("(a").is_err());
    /// ```
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        RegexBuilder::new(pattern).build()
    }

    pub(crate) fn from_parts(pattern: String, nfa: NFA) -> Regex {
        Regex { pattern, nfa }
    }

    /// Returns true if and only if the *entire* input is in the language of
    /// this regex.
    ///
    /// This runs in time proportional to the pattern size times the input
    /// length, whatever the pattern.
    ///
    /// ```
    /// use regeng::Regex;
    ///
    /// let re = Regex::new("[0-9]?[0-9]").unwrap();
    /// assert!(re.is_match("5"));
    /// assert!(re.is_match("99"));
    /// assert!(!re.is_match("125"));
    /// ```
    pub fn is_match(&self, input: &str) -> bool {
        Matcher::new(&self.nfa).is_match(input)
    }

    /// Returns the leftmost-longest match anywhere in `haystack`.
    ///
    /// Among all matches, the one starting earliest wins, and among those
    /// the longest. Offsets are in bytes.
    ///
    /// ```
    /// use regeng::Regex;
    ///
    /// let re = Regex::new(r"\d+").unwrap();
    /// let m = re.find("abc 123a").unwrap();
    /// assert_eq!(m.as_str(), "123");
    /// assert_eq!(m.range(), 4..7);
    /// ```
    pub fn find<'h>(&self, haystack: &'h str) -> Option<Match<'h>> {
        self.find_at(haystack, 0)
    }

    /// Like [`Regex::find`], but starts the search at byte offset `start`.
    ///
    /// # Panics
    ///
    /// When `start` is not on a char boundary of `haystack`.
    pub fn find_at<'h>(&self, haystack: &'h str, start: usize) -> Option<Match<'h>> {
        Matcher::new(&self.nfa)
            .find_at(haystack, start)
            .map(|m| Match::new(haystack, m.start, m.end))
    }

    /// Returns an iterator over successive non-overlapping matches.
    ///
    /// An empty match that begins where the previous match ended is not
    /// reported.
    ///
    /// ```
    /// use regeng::Regex;
    ///
    /// let re = Regex::new("[0-9]+").unwrap();
    /// let nums: Vec<&str> = re.find_iter("a1b22c333").map(|m| m.as_str()).collect();
    /// assert_eq!(nums, vec!["1", "22", "333"]);
    /// ```
    pub fn find_iter<'r, 'h>(&'r self, haystack: &'h str) -> Matches<'r, 'h> {
        Matches { re: self, haystack, at: 0, last_end: None }
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns the number of states in the compiled automaton.
    pub fn state_len(&self) -> usize {
        self.nfa.len()
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.as_str()).finish()
    }
}

impl FromStr for Regex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Regex, Error> {
        Regex::new(s)
    }
}

/// A single match of a regex in a haystack.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Match<'h> {
    haystack: &'h str,
    start: usize,
    end: usize,
}

impl<'h> Match<'h> {
    fn new(haystack: &'h str, start: usize, end: usize) -> Match<'h> {
        Match { haystack, start, end }
    }

    /// The byte offset where the match begins.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The byte offset just past the end of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns true if this match has length zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The length of the match in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The byte range of the match.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched text.
    #[inline]
    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.range()]
    }
}

impl<'h> fmt::Debug for Match<'h> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("string", &self.as_str())
            .finish()
    }
}

impl<'h> From<Match<'h>> for &'h str {
    fn from(m: Match<'h>) -> &'h str {
        m.as_str()
    }
}

impl<'h> From<Match<'h>> for Range<usize> {
    fn from(m: Match<'h>) -> Range<usize> {
        m.range()
    }
}

/// An iterator over all non-overlapping matches in a haystack.
///
/// Created by [`Regex::find_iter`].
#[derive(Debug)]
pub struct Matches<'r, 'h> {
    re: &'r Regex,
    haystack: &'h str,
    at: usize,
    last_end: Option<usize>,
}

impl<'r, 'h> Matches<'r, 'h> {
    /// The byte offset of the char after `at`, or past the end.
    fn step_over(&self, at: usize) -> usize {
        at + self.haystack[at..].chars().next().map_or(1, |c| c.len_utf8())
    }
}

impl<'r, 'h> Iterator for Matches<'r, 'h> {
    type Item = Match<'h>;

    fn next(&mut self) -> Option<Match<'h>> {
        loop {
            if self.at > self.haystack.len() {
                return None;
            }
            let m = self.re.find_at(self.haystack, self.at)?;
            if m.is_empty() {
                self.at = self.step_over(m.end());
                if self.last_end == Some(m.end()) {
                    continue;
                }
            } else {
                self.at = m.end();
            }
            self.last_end = Some(m.end());
            return Some(m);
        }
    }
}

impl<'r, 'h> core::iter::FusedIterator for Matches<'r, 'h> {}
