/*!
This crate provides a small regular expression recognizer built on
Thompson's construction.

A pattern is parsed into an abstract syntax tree, compiled into a
non-deterministic finite automaton with epsilon transitions, and then
simulated against the input by tracking the set of states the automaton
could be in. Nothing ever backtracks, so matching takes time proportional
to the size of the pattern times the length of the input, for every
pattern and every input.

# Example

```
use regeng::Regex;

let re = Regex::new("(a|b)*c").unwrap();
assert!(re.is_match("baabac"));
assert!(re.is_match("c"));
assert!(!re.is_match("cabbba"));
```

[`Regex::is_match`] answers whether the *whole* input belongs to the
language of the pattern. To look for a match anywhere in a string, use
[`Regex::find`] or [`Regex::find_iter`]:

```
use regeng::Regex;

let re = Regex::new(r"[a-z]\d").unwrap();
let m = re.find("A1 b2").unwrap();
assert_eq!(m.as_str(), "b2");
assert_eq!(m.start(), 3);
```

# Syntax

<pre class="rust">
x        a literal character
xy       concatenation (x followed by y)
x|y      union (x or y), lowest precedence
x*       zero or more of x
x+       one or more of x
x?       zero or one of x
(x)      grouping
[a-z]    any character in the inclusive range a to z
[a-zA-Z_] a union of ranges and single characters
\d       [0-9]
\w       [0-9A-Z_a-z]
\s       [\t\n\x0B\x0C\r ]
\n \t \r newline, tab and carriage return
\x       any other escaped character x matches itself, e.g. \* or \[
</pre>

Inside brackets every metacharacter except `]` and `-` is a literal. A `-`
outside brackets is a literal too. There are no anchors: `is_match` is
always anchored at both ends and `find` never is.

# Errors

Malformed patterns are rejected when the `Regex` is built, with the
character offset of the problem:

```
use regeng::{ErrorKind, Regex};

let err = Regex::new("[a-]").unwrap_err();
let syntax = err.syntax().unwrap();
assert_eq!(syntax.kind(), &ErrorKind::IncompleteRange);
assert_eq!(syntax.position(), 2);
```

Matching never fails.

# Crate features

* **logging** - Enables the `log` crate to emit messages about compiled
  patterns and their automaton sizes.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

pub use crate::{
    builder::RegexBuilder,
    error::{Error, ErrorKind, SyntaxError},
    regex::{Match, Matches, Regex},
};

#[macro_use]
mod macros;

mod builder;
mod error;
mod regex;
