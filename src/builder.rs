use regeng_syntax::ParserBuilder;
use thompson_nfa_compiler::Compiler;

use crate::{error::Error, regex::Regex};

/// The default limit on the number of NFA states.
const DEFAULT_SIZE_LIMIT: usize = 1 << 20;

/// The default limit on group nesting.
const DEFAULT_NEST_LIMIT: u32 = 250;

/// A configurable builder for a [`Regex`].
///
/// ```
/// use regeng::RegexBuilder;
///
/// let re = RegexBuilder::new("(a|b)*c").nest_limit(10).build().unwrap();
/// assert!(re.is_match("abbc"));
/// ```
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    nest_limit: u32,
    size_limit: usize,
}

impl RegexBuilder {
    /// Create a new builder with a default configuration for the given
    /// pattern.
    pub fn new(pattern: &str) -> RegexBuilder {
        RegexBuilder {
            pattern: pattern.to_string(),
            nest_limit: DEFAULT_NEST_LIMIT,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// Compile the pattern.
    ///
    /// Parsing runs first, so a malformed pattern always reports its
    /// syntax error even when it would also be too big.
    pub fn build(&self) -> Result<Regex, Error> {
        let ast = ParserBuilder::new()
            .nest_limit(self.nest_limit)
            .build()
            .parse(&self.pattern)?;
        let nfa = Compiler::new()
            .size_limit(Some(self.size_limit))
            .compile(&ast)?;
        debug!("built regex {:?} with {} NFA states", self.pattern, nfa.len());
        Ok(Regex::from_parts(self.pattern.clone(), nfa))
    }

    /// Set the nesting limit for groups.
    ///
    /// Parsing and compiling recurse once per level of group nesting and
    /// not per character, so this bounds how much stack a pattern can use. A limit of `0` forbids groups entirely.
    ///
    /// ```
    /// use regeng::RegexBuilder;
    ///
    /// assert!(RegexBuilder::new("((a))").nest_limit(2).build().is_ok());
    /// assert!(RegexBuilder::new("((a))").nest_limit(1).build().is_err());
    /// ```
    pub fn nest_limit(&mut self, limit: u32) -> &mut RegexBuilder {
        self.nest_limit = limit;
        self
    }

    /// Set the maximum number of NFA states a compiled pattern may use.
    ///
    /// The default is about one million states. Every literal, range and
    /// operator costs one state, plus one for the match state.
    ///
    /// ```
    /// use regeng::{Error, RegexBuilder};
    ///
    /// let err = RegexBuilder::new("abc").size_limit(2).build().unwrap_err();
    /// assert_eq!(err, Error::CompiledTooBig(2));
    /// ```
    pub fn size_limit(&mut self, limit: usize) -> &mut RegexBuilder {
        self.size_limit = limit;
        self
    }
}
