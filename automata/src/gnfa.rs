use log::debug;
use syntax::{parse_regex, RegexError};
use thiserror::Error;
use crate::thompson::compile_regex;
use crate::{Alphabet, Automaton, Label, Nfa};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the label `{label}` from {from} to {to} is not a valid regex")]
pub struct LabelError {
  pub from: String,
  pub to: String,
  pub label: String,
  #[source]
  pub source: RegexError,
}

/// Splices a compiled NFA in place of every transition whose label is a
/// regex.
///
/// The sub-NFA of the `i`th transition has its states named `t{i}.0`,
/// `t{i}.1`, ..., with the prefix padded by `_` until no existing state
/// name starts with it. The input is left untouched.
pub(crate) fn reduce(
  gnfa: &Automaton,
  alphabet: Option<&Alphabet>
) -> Result<Nfa, LabelError> {
  let mut nfa = Automaton::new();
  nfa.states = gnfa.states.clone();
  let mut spliced = 0;

  for (i, t) in gnfa.transitions.iter().enumerate() {
    if t.label.is_plain(alphabet) {
      nfa.transitions.push(t.clone());
      continue;
    }

    let source = t.label.source();
    let regex = parse_regex(&source).map_err(|source_error| LabelError {
      from: t.from.clone(),
      to: t.to.clone(),
      label: source.clone(),
      source: source_error,
    })?;

    let mut prefix = format!("t{}.", i);
    while gnfa.states.keys().any(|name| name.starts_with(&prefix)) {
      prefix.insert(0, '_');
    }

    let sub = compile_regex(&regex, &prefix).into_inner();
    for state in sub.states.values() {
      nfa.add_state(&state.name, false, false);
    }
    for state in sub.start_states() {
      nfa.add_transition(&t.from, &state.name, Label::epsilon());
    }
    for state in sub.accepting_states() {
      nfa.add_transition(&state.name, &t.to, Label::epsilon());
    }
    nfa.transitions.extend(sub.transitions);
    spliced += 1;
  }

  debug!(
    "spliced {} regex labels, {} states in the reduced NFA",
    spliced,
    nfa.states.len());

  Ok(Nfa::from(nfa))
}
