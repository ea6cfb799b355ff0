//! Thompson NFA Compiler
//!
//! This library compiles a parsed regeng pattern into a Thompson NFA and
//! simulates it. States live in a single arena and refer to each other by
//! index. Compilation builds fragments whose dangling transitions (holes)
//! are patched by index once their successor is known.
//!
//! The simulator tracks the set of active states instead of backtracking, so
//! matching is linear in the length of the input for a fixed pattern.

#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod nfa;
pub mod compiler;
pub mod matcher;
pub mod sparse_set;

pub use nfa::{NFA, State, StateId, Predicate, Fragment, Hole, Slot};
pub use compiler::{compile, Compiler};
pub use matcher::{Matcher, MatchResult};

/// The result of compiling a pattern to a Thompson NFA
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur during compilation
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The NFA would need more states than the configured limit
    TooComplex { limit: usize },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::TooComplex { limit } => {
                write!(f, "compiled NFA exceeds size limit of {} states", limit)
            }
        }
    }
}

impl std::error::Error for CompileError {}
