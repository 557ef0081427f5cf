use std::collections::HashMap;
use std::mem;
use thiserror::Error;
use super::ast::Regex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {}..{}", .span.0, .span.1)]
pub struct RegexError {
  pub kind: RegexErrorKind,
  /// byte offsets into the regex source.
  pub span: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegexErrorKind {
  #[error("unclosed parenthesis")]
  UnclosedParen,
  #[error("unmatched closing parenthesis")]
  UnopenedParen,
  #[error("missing operand")]
  MissingOperand,
}

/// A source character, or a parenthesized span with its own elements.
#[derive(Debug)]
enum Element {
  Token(usize, char),
  Group((usize, usize), Vec<Element>),
}

enum Item {
  Operand(Regex),
  Pipe(usize),
}

/// Parses `*`, `+`, `|` and parentheses; every other character is a literal.
///
/// Precedence from low to high: alternation, concatenation, postfix
/// quantifiers. The empty string parses to [`Regex::Empty`].
pub fn parse_regex(input: &str) -> Result<Regex, RegexError> {
  if input.is_empty() {
    return Ok(Regex::Empty);
  }

  let chars = input.char_indices().collect::<Vec<_>>();
  let parens = match_parens(&chars)?;
  let elements = element_tree(&chars, &parens, 0, chars.len());

  reduce(elements, (0, input.len()))
}

/// Maps the index of every `(` to the index of its matching `)`.
fn match_parens(
  chars: &[(usize, char)]
) -> Result<HashMap<usize, usize>, RegexError> {
  let mut parens = HashMap::new();
  let mut stack = vec![];

  for (i, &(offset, c)) in chars.iter().enumerate() {
    match c {
      '(' => stack.push(i),
      ')' => {
        let open = stack.pop().ok_or(RegexError {
          kind: RegexErrorKind::UnopenedParen,
          span: (offset, offset + 1),
        })?;
        parens.insert(open, i);
      }
      _ => {}
    }
  }

  if let Some(open) = stack.pop() {
    let offset = chars[open].0;
    return Err(RegexError {
      kind: RegexErrorKind::UnclosedParen,
      span: (offset, offset + 1),
    });
  }

  Ok(parens)
}

fn element_tree(
  chars: &[(usize, char)],
  parens: &HashMap<usize, usize>,
  start: usize,
  end: usize,
) -> Vec<Element> {
  let mut elements = vec![];
  let mut i = start;

  while i < end {
    let (offset, c) = chars[i];
    if c == '(' {
      let close = parens[&i];
      let span = (offset, chars[close].0 + 1);
      elements.push(Element::Group(
        span,
        element_tree(chars, parens, i + 1, close)));
      i = close + 1;
    } else {
      elements.push(Element::Token(offset, c));
      i += 1;
    }
  }

  elements
}

fn reduce(elements: Vec<Element>, span: (usize, usize)) -> Result<Regex, RegexError> {
  if elements.is_empty() {
    return Err(RegexError {
      kind: RegexErrorKind::MissingOperand,
      span,
    });
  }

  let mut items = vec![];

  for element in elements {
    match element {
      Element::Token(offset, c @ '*') | Element::Token(offset, c @ '+') => {
        let operand = match items.pop() {
          Some(Item::Operand(operand)) => operand,
          _ => {
            return Err(RegexError {
              kind: RegexErrorKind::MissingOperand,
              span: (offset, offset + 1),
            });
          }
        };
        let quantified = if c == '*' {
          Regex::Many(Box::new(operand))
        } else {
          Regex::Many1(Box::new(operand))
        };
        items.push(Item::Operand(quantified));
      }
      Element::Token(offset, '|') => items.push(Item::Pipe(offset)),
      Element::Token(_, c) => items.push(Item::Operand(Regex::Char(c))),
      Element::Group(span, elements) => {
        items.push(Item::Operand(reduce(elements, span)?));
      }
    }
  }

  let mut alts = vec![];
  let mut run = vec![];
  let mut last_pipe = None;

  for item in items {
    match item {
      Item::Operand(operand) => run.push(operand),
      Item::Pipe(offset) => {
        if run.is_empty() {
          return Err(RegexError {
            kind: RegexErrorKind::MissingOperand,
            span: (offset, offset + 1),
          });
        }
        alts.push(concat(mem::take(&mut run)));
        last_pipe = Some(offset);
      }
    }
  }

  if run.is_empty() {
    let span = last_pipe.map_or(span, |offset| (offset, offset + 1));
    return Err(RegexError {
      kind: RegexErrorKind::MissingOperand,
      span,
    });
  }
  alts.push(concat(run));

  if alts.len() == 1 {
    Ok(alts.remove(0))
  } else {
    Ok(Regex::Alt(alts))
  }
}

fn concat(mut items: Vec<Regex>) -> Regex {
  if items.len() == 1 {
    items.remove(0)
  } else {
    Regex::Concat(items)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn ch(c: char) -> Regex {
    Regex::Char(c)
  }

  fn many(regex: Regex) -> Regex {
    Regex::Many(Box::new(regex))
  }

  #[test]
  fn single_char() {
    assert_eq!(parse_regex("a"), Ok(ch('a')));
  }

  #[test]
  fn empty_source() {
    assert_eq!(parse_regex(""), Ok(Regex::Empty));
  }

  #[test]
  fn star_binds_tighter_than_concat() {
    assert_eq!(
      parse_regex("a*b"),
      Ok(Regex::Concat(vec![many(ch('a')), ch('b')])));
    assert_eq!(
      parse_regex("ab+"),
      Ok(Regex::Concat(vec![ch('a'), Regex::Many1(Box::new(ch('b')))])));
  }

  #[test]
  fn pipe_binds_looser_than_concat() {
    assert_eq!(
      parse_regex("ab|c|de"),
      Ok(Regex::Alt(vec![
        Regex::Concat(vec![ch('a'), ch('b')]),
        ch('c'),
        Regex::Concat(vec![ch('d'), ch('e')]),
      ])));
  }

  #[test]
  fn groups() {
    assert_eq!(
      parse_regex("(a|b)*c"),
      Ok(Regex::Concat(vec![
        many(Regex::Alt(vec![ch('a'), ch('b')])),
        ch('c'),
      ])));
    assert_eq!(parse_regex("((a))"), Ok(ch('a')));
  }

  #[test]
  fn stacked_quantifiers() {
    assert_eq!(
      parse_regex("a*+"),
      Ok(Regex::Many1(Box::new(many(ch('a'))))));
  }

  #[test]
  fn unmatched_parens() {
    assert_eq!(
      parse_regex("(ab"),
      Err(RegexError { kind: RegexErrorKind::UnclosedParen, span: (0, 1) }));
    assert_eq!(
      parse_regex("a(b))"),
      Err(RegexError { kind: RegexErrorKind::UnopenedParen, span: (4, 5) }));
    assert_eq!(
      parse_regex(")("),
      Err(RegexError { kind: RegexErrorKind::UnopenedParen, span: (0, 1) }));
  }

  #[test]
  fn missing_operands() {
    assert_eq!(
      parse_regex("*a"),
      Err(RegexError { kind: RegexErrorKind::MissingOperand, span: (0, 1) }));
    assert_eq!(
      parse_regex("a|"),
      Err(RegexError { kind: RegexErrorKind::MissingOperand, span: (1, 2) }));
    assert_eq!(
      parse_regex("|a"),
      Err(RegexError { kind: RegexErrorKind::MissingOperand, span: (0, 1) }));
    assert_eq!(
      parse_regex("a()"),
      Err(RegexError { kind: RegexErrorKind::MissingOperand, span: (1, 3) }));
  }

  #[test]
  fn display_round_trip() {
    let sources = [
      "a*b", "(a|b)*c", "ab|c", "(ab)+", "a(b|c)d", "a**", "(ab)c", "a(bc)d", "a|(b|c)",
    ];
    for source in &sources {
      let regex = parse_regex(source).unwrap();
      assert_eq!(regex.to_string(), *source);
      assert_eq!(parse_regex(&regex.to_string()).unwrap(), regex);
    }
  }

  #[test]
  fn grouped_concat_keeps_parens() {
    let regex = parse_regex("(ab)c").unwrap();
    assert_eq!(
      regex,
      Regex::Concat(vec![Regex::Concat(vec![ch('a'), ch('b')]), ch('c')]));
    assert_eq!(regex.to_string(), "(ab)c");
    assert_eq!(parse_regex("abc").unwrap().to_string(), "abc");
  }

  #[test]
  fn error_message() {
    let err = parse_regex("(a").unwrap_err();
    assert_eq!(err.to_string(), "unclosed parenthesis at 0..1");
  }
}
