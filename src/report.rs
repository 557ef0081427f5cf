use syntax::RegexError;
use crate::Error;

/// Renders an error for the terminal. Regex errors, including those in
/// GNFA labels, quote the offending source with a caret under the span.
pub fn report(err: &Error) -> String {
  match err {
    Error::Regex { regex, error } => {
      format!("error: {}\n{}", error.kind, underline(regex, error))
    }
    Error::Label(err) => {
      format!("error: {}: {}\n{}", err, err.source.kind, underline(&err.label, &err.source))
    }
    _ => format!("error: {}", err),
  }
}

fn underline(source: &str, err: &RegexError) -> String {
  let (start, end) = err.span;
  let column = source.get(..start).map_or(0, |prefix| prefix.chars().count());
  let width = source.get(start..end).map_or(1, |span| span.chars().count()).max(1);

  format!("  {}\n  {}{}", source, " ".repeat(column), "^".repeat(width))
}
