use std::fmt;

/// A convenience alias for results produced while lexing or parsing.
pub type Result<T> = core::result::Result<T, SyntaxError>;

/// An error that occurs when a pattern is malformed.
///
/// The position is a character offset (not a byte offset) into the pattern
/// and points at the token that made the pattern invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: ErrorKind,
    position: usize,
}

/// The kind of syntax error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A `(` without a matching `)`.
    UnclosedGroup,
    /// A `)` without a matching `(`.
    UnopenedGroup,
    /// A group with nothing inside it, e.g., `()`.
    EmptyGroup,
    /// A `[` without a matching `]`.
    UnclosedClass,
    /// A `]` without a matching `[`.
    UnopenedClass,
    /// A bracket class with no items, e.g., `[]`.
    EmptyClass,
    /// A `-` in a bracket class that is missing one of its endpoints.
    IncompleteRange,
    /// A range whose start is greater than its end, e.g., `[z-a]`.
    InvalidRange {
        /// The start of the range.
        lo: char,
        /// The end of the range.
        hi: char,
    },
    /// A repetition operator with nothing to repeat.
    RepetitionMissing,
    /// A `|` with an empty branch on either side.
    EmptyAlternate,
    /// A `\` at the very end of the pattern.
    TrailingEscape,
    /// Groups nested deeper than the configured limit.
    NestLimitExceeded(u32),
}

impl SyntaxError {
    pub(crate) fn new(kind: ErrorKind, position: usize) -> SyntaxError {
        SyntaxError { kind, position }
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Return the character offset in the pattern where the error occurred.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex parse error at position {}: {}", self.position, self.kind)
    }
}

impl std::error::Error for SyntaxError {}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnclosedGroup => write!(f, "unclosed group"),
            ErrorKind::UnopenedGroup => write!(f, "unopened group"),
            ErrorKind::EmptyGroup => write!(f, "empty group"),
            ErrorKind::UnclosedClass => write!(f, "unclosed character class"),
            ErrorKind::UnopenedClass => write!(f, "unopened character class"),
            ErrorKind::EmptyClass => write!(f, "empty character class"),
            ErrorKind::IncompleteRange => {
                write!(f, "character class range is missing an endpoint")
            }
            ErrorKind::InvalidRange { lo, hi } => write!(
                f,
                "invalid character class range {:?}-{:?}: start is greater than end",
                lo, hi
            ),
            ErrorKind::RepetitionMissing => {
                write!(f, "repetition operator missing expression")
            }
            ErrorKind::EmptyAlternate => {
                write!(f, "alternation branch is empty")
            }
            ErrorKind::TrailingEscape => {
                write!(f, "incomplete escape sequence at end of pattern")
            }
            ErrorKind::NestLimitExceeded(limit) => {
                write!(f, "exceed the maximum number of nested groups ({})", limit)
            }
        }
    }
}
