use insta::assert_debug_snapshot;
use syntax::{parse_regex, RegexErrorKind};

#[test]
fn tree() {
  assert_debug_snapshot!(parse_regex("a|bc*").unwrap(), @r###"
  Alt(
      [
          Char(
              'a',
          ),
          Concat(
              [
                  Char(
                      'b',
                  ),
                  Many(
                      Char(
                          'c',
                      ),
                  ),
              ],
          ),
      ],
  )
  "###);
}

#[test]
fn symbols() {
  let regex = parse_regex("(ba|c)*a+").unwrap();
  assert_eq!(regex.symbols().into_iter().collect::<String>(), "abc");
  assert!(parse_regex("").unwrap().symbols().is_empty());
}

#[test]
fn any_character_is_a_symbol() {
  let regex = parse_regex("0.,1").unwrap();
  assert_eq!(regex.symbols().len(), 4);
  assert_eq!(regex.to_string(), "0.,1");
}

#[test]
fn nested_errors() {
  let err = parse_regex("a(b|(c*|))").unwrap_err();
  assert_eq!(err.kind, RegexErrorKind::MissingOperand);
  assert_eq!(err.span, (7, 8));
}
