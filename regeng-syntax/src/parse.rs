/*!
A recursive descent parser from tokens to an [`Ast`].

The grammar, from lowest to highest precedence:

```text
expr   := term ('|' term)*
term   := factor+
factor := atom ('*' | '+' | '?')?
atom   := literal | class | '(' expr ')'
class  := '[' item+ ']'
item   := literal ('-' literal)? | shorthand
```
*/

use crate::{
    ast::Ast,
    error::{ErrorKind, Result, SyntaxError},
    lex::{self, ClassKind, Lexeme, Token},
};

/// A builder for a regular expression parser.
///
/// This builder permits modifying configuration options for the parser.
#[derive(Clone, Debug)]
pub struct ParserBuilder {
    nest_limit: u32,
}

impl Default for ParserBuilder {
    fn default() -> ParserBuilder {
        ParserBuilder::new()
    }
}

impl ParserBuilder {
    /// Create a new parser builder with a default configuration.
    pub fn new() -> ParserBuilder {
        ParserBuilder { nest_limit: 250 }
    }

    /// Build a parser from this configuration.
    pub fn build(&self) -> Parser {
        Parser { nest_limit: self.nest_limit }
    }

    /// Set the nesting limit for groups.
    ///
    /// The parser and the compiler only recurse on nested groups, never on
    /// the length of a pattern, so this bounds their stack usage. A limit of `0` rejects every group, a limit
    /// of `1` permits `(a)` but not `((a))`.
    pub fn nest_limit(&mut self, limit: u32) -> &mut ParserBuilder {
        self.nest_limit = limit;
        self
    }
}

/// A regular expression parser.
#[derive(Clone, Debug)]
pub struct Parser {
    nest_limit: u32,
}

impl Default for Parser {
    fn default() -> Parser {
        ParserBuilder::new().build()
    }
}

impl Parser {
    /// Create a new parser with a default configuration.
    pub fn new() -> Parser {
        Parser::default()
    }

    /// Lex and parse `pattern`.
    pub fn parse(&self, pattern: &str) -> Result<Ast> {
        let lexemes = lex::tokenize(pattern)?;
        self.parse_tokens(&lexemes)
    }

    /// Parse an already tokenized pattern.
    pub fn parse_tokens(&self, lexemes: &[Lexeme]) -> Result<Ast> {
        ParserI { lexemes, pos: 0, depth: 0, nest_limit: self.nest_limit }
            .parse()
    }
}

/// Parse tokens with the default configuration.
pub fn parse(lexemes: &[Lexeme]) -> Result<Ast> {
    Parser::new().parse_tokens(lexemes)
}

/// Lex and parse `pattern` with the default configuration.
pub fn parse_pattern(pattern: &str) -> Result<Ast> {
    Parser::new().parse(pattern)
}

struct ParserI<'t> {
    lexemes: &'t [Lexeme],
    pos: usize,
    depth: u32,
    nest_limit: u32,
}

impl<'t> ParserI<'t> {
    fn parse(mut self) -> Result<Ast> {
        if self.lexemes.is_empty() {
            return Ok(Ast::Empty);
        }
        let ast = self.parse_expr()?;
        match self.peek() {
            None => Ok(ast),
            // parse_expr only stops early on an unbalanced ')'.
            Some(_) => Err(self.error(ErrorKind::UnopenedGroup)),
        }
    }

    fn parse_expr(&mut self) -> Result<Ast> {
        let mut ast = self.parse_term()?;
        while self.peek() == Some(Token::Union) {
            self.bump();
            let rhs = self.parse_term()?;
            ast = Ast::union(ast, rhs);
        }
        Ok(ast)
    }

    fn parse_term(&mut self) -> Result<Ast> {
        let mut concat: Option<Ast> = None;
        while let Some(token) = self.peek() {
            if matches!(token, Token::Union | Token::RParen) {
                break;
            }
            let factor = self.parse_factor()?;
            concat = Some(match concat {
                None => factor,
                Some(lhs) => Ast::concat(lhs, factor),
            });
        }
        match concat {
            Some(ast) => Ok(ast),
            None if self.depth == 0 && self.peek() == Some(Token::RParen) => {
                Err(self.error(ErrorKind::UnopenedGroup))
            }
            None => Err(self.error(ErrorKind::EmptyAlternate)),
        }
    }

    fn parse_factor(&mut self) -> Result<Ast> {
        let atom = self.parse_atom()?;
        let ast = match self.peek() {
            Some(Token::Star) => Ast::star(atom),
            Some(Token::Plus) => Ast::plus(atom),
            Some(Token::Optional) => Ast::optional(atom),
            _ => return Ok(atom),
        };
        self.bump();
        // At most one postfix operator per atom.
        if self.peek().map_or(false, |t| t.is_repetition()) {
            return Err(self.error(ErrorKind::RepetitionMissing));
        }
        Ok(ast)
    }

    fn parse_atom(&mut self) -> Result<Ast> {
        let Some(lexeme) = self.current() else {
            return Err(self.error(ErrorKind::EmptyAlternate));
        };
        match lexeme.token {
            Token::LParen => self.parse_group(),
            Token::LBracket => self.parse_class(),
            Token::RBracket => Err(self.error(ErrorKind::UnopenedClass)),
            Token::RParen => Err(self.error(ErrorKind::UnopenedGroup)),
            Token::Union => Err(self.error(ErrorKind::EmptyAlternate)),
            Token::Star | Token::Plus | Token::Optional => {
                Err(self.error(ErrorKind::RepetitionMissing))
            }
            Token::Class(kind) => {
                self.bump();
                Ok(shorthand(kind))
            }
            Token::Literal(c) => {
                self.bump();
                Ok(Ast::Literal(c))
            }
            Token::Dash => {
                self.bump();
                Ok(Ast::Literal('-'))
            }
        }
    }

    fn parse_group(&mut self) -> Result<Ast> {
        let open = self.pos;
        if self.depth >= self.nest_limit {
            return Err(self.error(ErrorKind::NestLimitExceeded(self.nest_limit)));
        }
        self.bump();
        if self.peek() == Some(Token::RParen) {
            return Err(self.error_at(open, ErrorKind::EmptyGroup));
        }
        self.depth += 1;
        let inner = self.parse_expr()?;
        self.depth -= 1;
        if self.peek() != Some(Token::RParen) {
            return Err(self.error_at(open, ErrorKind::UnclosedGroup));
        }
        self.bump();
        Ok(Ast::group(inner))
    }

    fn parse_class(&mut self) -> Result<Ast> {
        let open = self.pos;
        self.bump();
        let mut class: Option<Ast> = None;
        loop {
            let Some(lexeme) = self.current() else {
                return Err(self.error_at(open, ErrorKind::UnclosedClass));
            };
            let item = match lexeme.token {
                Token::RBracket => break,
                Token::Dash => {
                    return Err(self.error(ErrorKind::IncompleteRange))
                }
                Token::Class(kind) => {
                    self.bump();
                    if self.peek() == Some(Token::Dash) {
                        return Err(self.error(ErrorKind::IncompleteRange));
                    }
                    shorthand(kind)
                }
                _ => self.parse_class_item(open)?,
            };
            class = Some(match class {
                None => item,
                Some(lhs) => Ast::union(lhs, item),
            });
        }
        self.bump();
        class.ok_or_else(|| self.error_at(open, ErrorKind::EmptyClass))
    }

    /// Parse `lo` or `lo-hi` inside a bracket class.
    fn parse_class_item(&mut self, open: usize) -> Result<Ast> {
        let start = self.pos;
        let lo = self.class_char()?;
        if self.peek() != Some(Token::Dash) {
            return Ok(Ast::Literal(lo));
        }
        self.bump();
        let hi = match self.peek() {
            None => return Err(self.error_at(open, ErrorKind::UnclosedClass)),
            Some(Token::RBracket) | Some(Token::Dash) | Some(Token::Class(_)) => {
                return Err(self.error_at(self.pos - 1, ErrorKind::IncompleteRange))
            }
            Some(_) => self.class_char()?,
        };
        if lo > hi {
            return Err(self.error_at(start, ErrorKind::InvalidRange { lo, hi }));
        }
        Ok(Ast::range(lo, hi))
    }

    fn class_char(&mut self) -> Result<char> {
        let ch = self
            .peek()
            .and_then(|t| t.as_char())
            .ok_or_else(|| self.error(ErrorKind::IncompleteRange))?;
        self.bump();
        Ok(ch)
    }

    fn current(&self) -> Option<Lexeme> {
        self.lexemes.get(self.pos).copied()
    }

    fn peek(&self) -> Option<Token> {
        self.current().map(|l| l.token)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// The character offset of the lexeme at `index`, or the end of the
    /// pattern when `index` is past the last lexeme.
    fn offset(&self, index: usize) -> usize {
        match self.lexemes.get(index) {
            Some(l) => l.position,
            None => self.lexemes.last().map_or(0, |l| l.position + 1),
        }
    }

    fn error(&self, kind: ErrorKind) -> SyntaxError {
        self.error_at(self.pos, kind)
    }

    fn error_at(&self, index: usize, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.offset(index))
    }
}

fn shorthand(kind: ClassKind) -> Ast {
    kind.ranges()
        .iter()
        .map(|&(lo, hi)| Ast::range(lo, hi))
        .reduce(Ast::union)
        .unwrap_or(Ast::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(pattern: &str) -> Ast {
        parse_pattern(pattern).unwrap()
    }

    fn perr(pattern: &str) -> (ErrorKind, usize) {
        let err = parse_pattern(pattern).unwrap_err();
        (err.kind().clone(), err.position())
    }

    fn lit(c: char) -> Ast {
        Ast::Literal(c)
    }

    #[test]
    fn empty_pattern() {
        assert_eq!(p(""), Ast::Empty);
    }

    #[test]
    fn concat_is_left_associative() {
        assert_eq!(
            p("abc"),
            Ast::concat(Ast::concat(lit('a'), lit('b')), lit('c'))
        );
    }

    #[test]
    fn union_binds_loosest() {
        assert_eq!(
            p("ab|c"),
            Ast::union(Ast::concat(lit('a'), lit('b')), lit('c'))
        );
        assert_eq!(
            p("a|b|c"),
            Ast::union(Ast::union(lit('a'), lit('b')), lit('c'))
        );
    }

    #[test]
    fn repetition_binds_tightest() {
        assert_eq!(p("ab*"), Ast::concat(lit('a'), Ast::star(lit('b'))));
        assert_eq!(p("a+"), Ast::plus(lit('a')));
        assert_eq!(p("a?"), Ast::optional(lit('a')));
    }

    #[test]
    fn group() {
        assert_eq!(
            p("(a|b)*c"),
            Ast::concat(
                Ast::star(Ast::group(Ast::union(lit('a'), lit('b')))),
                lit('c')
            )
        );
    }

    #[test]
    fn range() {
        assert_eq!(p("[0-9]"), Ast::Range('0', '9'));
        assert_eq!(p("[a-a]"), lit('a'));
    }

    #[test]
    fn multi_range_class() {
        assert_eq!(
            p("[a-zA-Z_]"),
            Ast::union(
                Ast::union(Ast::Range('a', 'z'), Ast::Range('A', 'Z')),
                lit('_')
            )
        );
    }

    #[test]
    fn metacharacters_in_class_are_literal() {
        assert_eq!(p("[(]"), lit('('));
        assert_eq!(p("[*-+]"), Ast::Range('*', '+'));
        assert_eq!(p(r"[\]]"), lit(']'));
    }

    #[test]
    fn shorthand_classes() {
        assert_eq!(p(r"\d"), Ast::Range('0', '9'));
        assert_eq!(
            p(r"[\dx]"),
            Ast::union(Ast::Range('0', '9'), lit('x'))
        );
    }

    #[test]
    fn stray_dash_is_literal() {
        assert_eq!(p("a-b"), Ast::concat(Ast::concat(lit('a'), lit('-')), lit('b')));
    }

    #[test]
    fn long_patterns_stay_flat() {
        let ast = p(&"a".repeat(100_000));
        match ast {
            Ast::Concat(ref items) => assert_eq!(items.len(), 100_000),
            _ => panic!("expected a concatenation"),
        }

        let class = format!("[{}]", "abcdefghij".repeat(10_000));
        match p(&class) {
            Ast::Union(ref items) => assert_eq!(items.len(), 100_000),
            _ => panic!("expected a union"),
        }
    }

    #[test]
    fn err_unclosed_group() {
        assert_eq!(perr("(a"), (ErrorKind::UnclosedGroup, 0));
        assert_eq!(perr("x((a)"), (ErrorKind::UnclosedGroup, 1));
    }

    #[test]
    fn err_unopened_group() {
        assert_eq!(perr("a)"), (ErrorKind::UnopenedGroup, 1));
        assert_eq!(perr(")"), (ErrorKind::UnopenedGroup, 0));
    }

    #[test]
    fn err_empty_group() {
        assert_eq!(perr("a()"), (ErrorKind::EmptyGroup, 1));
    }

    #[test]
    fn err_classes() {
        assert_eq!(perr("[a-z"), (ErrorKind::UnclosedClass, 0));
        assert_eq!(perr("a]"), (ErrorKind::UnopenedClass, 1));
        assert_eq!(perr("[]"), (ErrorKind::EmptyClass, 0));
        assert_eq!(perr("[a-]"), (ErrorKind::IncompleteRange, 2));
        assert_eq!(perr("[-a]"), (ErrorKind::IncompleteRange, 1));
        assert_eq!(
            perr("x[z-a]"),
            (ErrorKind::InvalidRange { lo: 'z', hi: 'a' }, 2)
        );
    }

    #[test]
    fn err_repetition_missing() {
        assert_eq!(perr("*a"), (ErrorKind::RepetitionMissing, 0));
        assert_eq!(perr("a**"), (ErrorKind::RepetitionMissing, 2));
        assert_eq!(perr("(a)+?"), (ErrorKind::RepetitionMissing, 4));
        assert_eq!(perr("b*+c"), (ErrorKind::RepetitionMissing, 2));
        assert_eq!(perr("(+a)"), (ErrorKind::RepetitionMissing, 1));
        assert_eq!(perr("a|?"), (ErrorKind::RepetitionMissing, 2));
    }

    #[test]
    fn err_empty_alternate() {
        assert_eq!(perr("|a"), (ErrorKind::EmptyAlternate, 0));
        assert_eq!(perr("a|"), (ErrorKind::EmptyAlternate, 2));
        assert_eq!(perr("a||b"), (ErrorKind::EmptyAlternate, 2));
        assert_eq!(perr("(a|)"), (ErrorKind::EmptyAlternate, 3));
    }

    #[test]
    fn err_nest_limit() {
        let parser = ParserBuilder::new().nest_limit(2).build();
        assert!(parser.parse("((a))").is_ok());
        let err = parser.parse("(((a)))").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NestLimitExceeded(2));
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn display_round_trips_language() {
        for pattern in ["(a|b)*c", "[0-9]?[0-9]", r"a\*b", "x(y+)?"] {
            let ast = p(pattern);
            assert_eq!(p(&ast.to_string()), ast, "pattern: {}", pattern);
        }
    }
}
