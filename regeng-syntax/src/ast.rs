use std::fmt;

/// The abstract syntax of a pattern.
///
/// Every node owns its children. The parser builds the tree bottom-up and the
/// compiler only ever borrows it.
///
/// Concatenations and unions are stored flat, so the depth of a tree only
/// grows with the nesting of groups and never with the length of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Matches only the empty string. Produced for the empty pattern.
    Empty,
    /// Matches exactly one character.
    Literal(char),
    /// Matches any character in the inclusive range `lo..=hi`.
    Range(char, char),
    /// Matches each item immediately followed by the next. This is a
    /// left-associative chain of binary concatenations and holds at least
    /// two items.
    Concat(Vec<Ast>),
    /// Matches any one of the items. This is a left-associative chain of
    /// binary unions and holds at least two items.
    Union(Vec<Ast>),
    /// Zero or more repetitions.
    Star(Box<Ast>),
    /// One or more repetitions.
    Plus(Box<Ast>),
    /// Zero or one occurrence.
    Optional(Box<Ast>),
    /// A parenthesized sub-expression.
    Group(Box<Ast>),
}

impl Ast {
    /// `left` followed by `right`. A concatenation on the left is extended
    /// in place rather than nested.
    pub fn concat(left: Ast, right: Ast) -> Ast {
        match left {
            Ast::Concat(mut items) => {
                items.push(right);
                Ast::Concat(items)
            }
            left => Ast::Concat(vec![left, right]),
        }
    }

    /// `left` or `right`. A union on the left is extended in place rather
    /// than nested.
    pub fn union(left: Ast, right: Ast) -> Ast {
        match left {
            Ast::Union(mut items) => {
                items.push(right);
                Ast::Union(items)
            }
            left => Ast::Union(vec![left, right]),
        }
    }

    pub fn star(child: Ast) -> Ast {
        Ast::Star(Box::new(child))
    }

    pub fn plus(child: Ast) -> Ast {
        Ast::Plus(Box::new(child))
    }

    pub fn optional(child: Ast) -> Ast {
        Ast::Optional(Box::new(child))
    }

    pub fn group(child: Ast) -> Ast {
        Ast::Group(Box::new(child))
    }

    /// A single character class item, collapsing one-character ranges.
    pub fn range(lo: char, hi: char) -> Ast {
        if lo == hi {
            Ast::Literal(lo)
        } else {
            Ast::Range(lo, hi)
        }
    }

    /// Returns true if this expression can match the empty string.
    pub fn is_nullable(&self) -> bool {
        match *self {
            Ast::Empty | Ast::Star(_) | Ast::Optional(_) => true,
            Ast::Literal(_) | Ast::Range(..) => false,
            Ast::Concat(ref items) => items.iter().all(Ast::is_nullable),
            Ast::Union(ref items) => items.iter().any(Ast::is_nullable),
            Ast::Plus(ref c) | Ast::Group(ref c) => c.is_nullable(),
        }
    }
}

/// Prints an AST back as a pattern.
///
/// For any tree the parser produces, parsing the output again yields an equal
/// tree. Hand-built trees may print as text that does not parse: the syntax
/// has no way to write the empty string below the top level, so
/// `Ast::star(Ast::Empty)` prints as `*`.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Ast::Empty => Ok(()),
            Ast::Literal(c) => write_literal(f, c),
            Ast::Range(lo, hi) => {
                write!(f, "[")?;
                write_literal(f, lo)?;
                write!(f, "-")?;
                write_literal(f, hi)?;
                write!(f, "]")
            }
            Ast::Concat(ref items) => {
                for item in items {
                    write_operand(f, item, Precedence::Concat)?;
                }
                Ok(())
            }
            Ast::Union(ref items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write_operand(f, item, Precedence::Union)?;
                }
                Ok(())
            }
            Ast::Star(ref c) => {
                write_operand(f, c, Precedence::Repetition)?;
                write!(f, "*")
            }
            Ast::Plus(ref c) => {
                write_operand(f, c, Precedence::Repetition)?;
                write!(f, "+")
            }
            Ast::Optional(ref c) => {
                write_operand(f, c, Precedence::Repetition)?;
                write!(f, "?")
            }
            Ast::Group(ref c) => write!(f, "({})", c),
        }
    }
}

#[derive(Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Union,
    Concat,
    Repetition,
    Atom,
}

fn precedence(ast: &Ast) -> Precedence {
    match *ast {
        Ast::Union(..) => Precedence::Union,
        Ast::Concat(..) => Precedence::Concat,
        Ast::Star(_) | Ast::Plus(_) | Ast::Optional(_) => {
            Precedence::Repetition
        }
        Ast::Empty
        | Ast::Literal(_)
        | Ast::Range(..)
        | Ast::Group(_) => Precedence::Atom,
    }
}

// Repetitions are never stacked by the parser, so an operand of a
// repetition must itself be an atom.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    ast: &Ast,
    context: Precedence,
) -> fmt::Result {
    let prec = precedence(ast);
    let needs_group = prec < context
        || (context == Precedence::Repetition && prec != Precedence::Atom);
    if needs_group {
        write!(f, "({})", ast)
    } else {
        write!(f, "{}", ast)
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '|' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '-' | '\\' => {
            write!(f, "\\{}", c)
        }
        '\n' => write!(f, "\\n"),
        '\t' => write!(f, "\\t"),
        '\r' => write!(f, "\\r"),
        c => write!(f, "{}", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_pattern;

    #[test]
    fn constructors_extend_left_chains() {
        let abc = Ast::concat(
            Ast::concat(Ast::Literal('a'), Ast::Literal('b')),
            Ast::Literal('c'),
        );
        assert_eq!(
            abc,
            Ast::Concat(vec![
                Ast::Literal('a'),
                Ast::Literal('b'),
                Ast::Literal('c'),
            ])
        );
        // A chain on the right is an operand, not part of the chain.
        let nested =
            Ast::union(Ast::Literal('a'), Ast::union(Ast::Literal('b'), Ast::Literal('c')));
        assert_eq!(
            nested,
            Ast::Union(vec![
                Ast::Literal('a'),
                Ast::Union(vec![Ast::Literal('b'), Ast::Literal('c')]),
            ])
        );
    }

    #[test]
    fn nullable() {
        assert!(parse_pattern("").unwrap().is_nullable());
        assert!(parse_pattern("a*b?").unwrap().is_nullable());
        assert!(parse_pattern("a|b*").unwrap().is_nullable());
        assert!(!parse_pattern("a*b").unwrap().is_nullable());
        assert!(!parse_pattern("(a|b)+").unwrap().is_nullable());
    }

    #[test]
    fn display_of_parsed_trees_reparses() {
        let patterns = [
            "(a|b)*c",
            "ab|cd|e",
            "(ab|c)d",
            "[a-zA-Z_]",
            r"\(\-\)",
            "x(y+)?",
            "((a|b)c)*",
        ];
        for pattern in patterns {
            let ast = parse_pattern(pattern).unwrap();
            let printed = ast.to_string();
            assert_eq!(
                parse_pattern(&printed).unwrap(),
                ast,
                "{} printed as {}",
                pattern,
                printed
            );
        }
    }

    #[test]
    fn display_of_hand_built_empty_operand() {
        assert_eq!(Ast::star(Ast::Empty).to_string(), "*");
        assert!(parse_pattern("*").is_err());
    }
}
