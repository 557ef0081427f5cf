//! Regular expression syntax: `*`, `+`, `|` and parentheses over an
//! arbitrary symbol alphabet, with no escapes.

mod ast;
mod regex;

pub use ast::Regex;
pub use regex::{parse_regex, RegexError, RegexErrorKind};
