use std::collections::BTreeSet;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Regex {
  /// The empty source string.
  Empty,
  Char(char),
  Concat(Vec<Regex>),
  Alt(Vec<Regex>),
  /// Zero or more repetitions, `x*`.
  Many(Box<Regex>),
  /// One or more repetitions, `x+`.
  Many1(Box<Regex>),
}

impl Regex {
  /// All literal characters occurring in the regex, in order.
  pub fn symbols(&self) -> BTreeSet<char> {
    let mut symbols = BTreeSet::new();
    collect_symbols(self, &mut symbols);
    symbols
  }
}

fn collect_symbols(regex: &Regex, symbols: &mut BTreeSet<char>) {
  match regex {
    Regex::Empty => {}
    Regex::Char(c) => {
      symbols.insert(*c);
    }
    Regex::Concat(items) | Regex::Alt(items) => {
      items.iter().for_each(|item| collect_symbols(item, symbols));
    }
    Regex::Many(item) | Regex::Many1(item) => {
      collect_symbols(item, symbols);
    }
  }
}

impl Display for Regex {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Empty => Ok(()),
      Self::Char(c) => write!(f, "{}", c),
      Self::Concat(items) => {
        for item in items {
          match item {
            Self::Alt(_) | Self::Concat(_) => write!(f, "({})", item)?,
            _ => write!(f, "{}", item)?,
          }
        }
        Ok(())
      }
      Self::Alt(alts) => {
        for (i, alt) in alts.iter().enumerate() {
          if i > 0 {
            write!(f, "|")?;
          }
          match alt {
            Self::Alt(_) => write!(f, "({})", alt)?,
            _ => write!(f, "{}", alt)?,
          }
        }
        Ok(())
      }
      Self::Many(item) => write_quantified(f, item, '*'),
      Self::Many1(item) => write_quantified(f, item, '+'),
    }
  }
}

fn write_quantified(
  f: &mut fmt::Formatter,
  item: &Regex,
  quantifier: char
) -> fmt::Result {
  match item {
    Regex::Concat(_) | Regex::Alt(_) => write!(f, "({}){}", item, quantifier),
    _ => write!(f, "{}{}", item, quantifier),
  }
}
