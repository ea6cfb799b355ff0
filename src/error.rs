use thompson_nfa_compiler::CompileError;

pub use regeng_syntax::{ErrorKind, SyntaxError};

/// An error that occurred during parsing or compiling a regular expression.
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A syntax error. The parser's error is passed through untouched.
    Syntax(SyntaxError),
    /// The compiled automaton exceeded the configured size limit. The limit
    /// is given, measured in NFA states.
    CompiledTooBig(usize),
}

impl Error {
    /// Returns the syntax error, if this is one.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match *self {
            Error::Syntax(ref err) => Some(err),
            Error::CompiledTooBig(_) => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Error {
        Error::Syntax(err)
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Error {
        match err {
            CompileError::TooComplex { limit } => Error::CompiledTooBig(limit),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Syntax(ref err) => Some(err),
            Error::CompiledTooBig(_) => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Error::Syntax(ref err) => err.fmt(f),
            Error::CompiledTooBig(limit) => write!(
                f,
                "Compiled regex exceeds size limit of {} states.",
                limit
            ),
        }
    }
}

// We implement our own Debug implementation so that we show nicer syntax
// errors when people use `Regex::new(...).unwrap()`.
impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Error::Syntax(ref err) => {
                let hr: String = core::iter::repeat('~').take(79).collect();
                writeln!(f, "Syntax(")?;
                writeln!(f, "{}", hr)?;
                writeln!(f, "{}", err)?;
                writeln!(f, "{}", hr)?;
                write!(f, ")")?;
                Ok(())
            }
            Error::CompiledTooBig(limit) => {
                f.debug_tuple("CompiledTooBig").field(&limit).finish()
            }
        }
    }
}
