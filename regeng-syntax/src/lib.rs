/*!
This crate provides the lexer and parser for regeng patterns.

A pattern is first split into [`lex::Token`]s and then parsed by recursive
descent into an [`Ast`]. Malformed patterns produce a [`SyntaxError`] that
carries the character offset of the offending token.

```
use regeng_syntax::{parse_pattern, Ast};

let ast = parse_pattern("a|b*").unwrap();
assert_eq!(
    ast,
    Ast::union(Ast::Literal('a'), Ast::star(Ast::Literal('b'))),
);
```
*/

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub use crate::{
    ast::Ast,
    error::{ErrorKind, Result, SyntaxError},
    lex::{tokenize, ClassKind, Lexeme, Token},
    parse::{parse, parse_pattern, Parser, ParserBuilder},
};

mod ast;
mod error;
pub mod lex;
pub mod parse;
