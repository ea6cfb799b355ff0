/*!
Turns a pattern into a flat sequence of tokens.

Every character that isn't a metacharacter becomes a literal. A backslash
makes the next character literal, except for the shorthand classes `\d`,
`\w` and `\s` and the control escapes `\n`, `\t` and `\r`.
*/

use crate::error::{ErrorKind, Result, SyntaxError};

/// A single lexical unit of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A character that matches itself.
    Literal(char),
    /// `|`
    Union,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Optional,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `-`
    Dash,
    /// `]`
    RBracket,
    /// One of the shorthand classes, e.g., `\d`.
    Class(ClassKind),
}

/// The shorthand character classes available through escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// `\d`, i.e., `[0-9]`.
    Digit,
    /// `\w`, i.e., `[0-9A-Z_a-z]`.
    Word,
    /// `\s`, i.e., `[\t-\r ]`.
    Space,
}

impl ClassKind {
    /// The inclusive ranges making up this class, sorted and disjoint.
    pub fn ranges(&self) -> &'static [(char, char)] {
        match *self {
            ClassKind::Digit => &[('0', '9')],
            ClassKind::Word => {
                &[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')]
            }
            ClassKind::Space => &[('\t', '\r'), (' ', ' ')],
        }
    }
}

impl Token {
    /// The character this token stands for when read as a literal.
    ///
    /// Inside a bracket class and for a stray `-`, metacharacters lose their
    /// meaning. Shorthand classes have no single character.
    pub fn as_char(&self) -> Option<char> {
        let ch = match *self {
            Token::Literal(c) => c,
            Token::Union => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Optional => '?',
            Token::LParen => '(',
            Token::RParen => ')',
            Token::LBracket => '[',
            Token::Dash => '-',
            Token::RBracket => ']',
            Token::Class(_) => return None,
        };
        Some(ch)
    }

    /// Whether this is one of the postfix repetition operators.
    pub fn is_repetition(&self) -> bool {
        matches!(*self, Token::Star | Token::Plus | Token::Optional)
    }
}

/// A token along with the character offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub position: usize,
}

/// Split `pattern` into tokens.
///
/// This only fails when the pattern ends with an unescaped `\`. Every other
/// malformation is reported by the parser.
pub fn tokenize(pattern: &str) -> Result<Vec<Lexeme>> {
    let mut lexemes = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars().enumerate();

    while let Some((position, ch)) = chars.next() {
        let token = match ch {
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Optional,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            '-' => Token::Dash,
            ']' => Token::RBracket,
            '\\' => match chars.next() {
                Some((_, escaped)) => escape(escaped),
                None => {
                    return Err(SyntaxError::new(
                        ErrorKind::TrailingEscape,
                        position,
                    ))
                }
            },
            c => Token::Literal(c),
        };
        lexemes.push(Lexeme { token, position });
    }
    Ok(lexemes)
}

fn escape(ch: char) -> Token {
    match ch {
        'd' => Token::Class(ClassKind::Digit),
        'w' => Token::Class(ClassKind::Word),
        's' => Token::Class(ClassKind::Space),
        'n' => Token::Literal('\n'),
        't' => Token::Literal('\t'),
        'r' => Token::Literal('\r'),
        c => Token::Literal(c),
    }
}
