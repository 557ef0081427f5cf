//! The JSON document format shared with editors and renderers.
//!
//! ```json
//! {
//!   "states": [{ "name": "A", "accepting": true, "starting": true }],
//!   "alphabet": ["a"],
//!   "transitions": [{ "from": "A", "to": "A", "label": "a" }]
//! }
//! ```
//!
//! Every field may be missing on import. `alphabet` is informative only:
//! it is written on export and ignored on import, where it is recomputed
//! from the transitions.

use serde::{Deserialize, Serialize};
use crate::{Automaton, Dfa, Label, Nfa, Position, State, Transition};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
  pub states: Vec<StateEntry>,
  pub alphabet: Option<Vec<String>>,
  pub transitions: Vec<TransitionEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateEntry {
  pub name: String,
  pub accepting: bool,
  pub starting: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionEntry {
  pub from: String,
  pub to: String,
  /// Comma-separated tokens, e.g. `"a, b"` or `"ε"`.
  pub label: String,
}

impl Document {
  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }

  pub fn to_json_compact(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }

  fn new(automaton: &Automaton, alphabet: Option<Vec<String>>) -> Self {
    let states = automaton.states.values()
      .map(|state| StateEntry {
        name: state.name.clone(),
        accepting: state.accepting,
        starting: state.starting,
        position: state.position,
      })
      .collect();
    let transitions = automaton.transitions.iter()
      .map(|t| TransitionEntry {
        from: t.from.clone(),
        to: t.to.clone(),
        label: t.label.to_string(),
      })
      .collect();

    Self { states, alphabet, transitions }
  }
}

/// Later states with a repeated name replace earlier ones.
impl From<Document> for Automaton {
  fn from(document: Document) -> Self {
    let mut automaton = Automaton::new();

    for entry in document.states {
      automaton.states.insert(entry.name.clone(), State {
        name: entry.name,
        starting: entry.starting,
        accepting: entry.accepting,
        position: entry.position,
      });
    }

    automaton.transitions = document.transitions.into_iter()
      .map(|entry| Transition {
        from: entry.from,
        to: entry.to,
        label: Label::parse(&entry.label),
      })
      .collect();

    automaton
  }
}

/// `alphabet` is `null` unless the DFA is valid.
impl From<&Dfa> for Document {
  fn from(dfa: &Dfa) -> Self {
    let alphabet = dfa.validate().ok()
      .map(|alphabet| alphabet.into_iter().map(String::from).collect());
    Self::new(dfa, alphabet)
  }
}

/// `alphabet` holds the symbols of the reachable transitions.
impl From<&Nfa> for Document {
  fn from(nfa: &Nfa) -> Self {
    let alphabet = nfa.alphabet().into_iter().map(String::from).collect();
    Self::new(nfa, Some(alphabet))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn even_a() -> Dfa {
    let mut dfa = Automaton::new();
    dfa.add_state("A", true, true);
    dfa.add_state("B", false, false);
    dfa.add_transition("A", "B", "a");
    dfa.add_transition("B", "A", "a");
    dfa.add_transition("A", "A", "b");
    dfa.add_transition("B", "B", "b");
    dfa.states["A"].position = Some(Position { x: 10.0, y: 20.5 });
    Dfa::from(dfa)
  }

  #[test]
  fn export_compact() {
    let json = Document::from(&even_a()).to_json_compact().unwrap();
    insta::assert_snapshot!(json, @r###"{"states":[{"name":"A","accepting":true,"starting":true,"position":{"x":10.0,"y":20.5}},{"name":"B","accepting":false,"starting":false}],"alphabet":["a","b"],"transitions":[{"from":"A","to":"B","label":"a"},{"from":"B","to":"A","label":"a"},{"from":"A","to":"A","label":"b"},{"from":"B","to":"B","label":"b"}]}"###);
  }

  #[test]
  fn invalid_dfa_has_no_alphabet() {
    let mut dfa = even_a();
    dfa.transitions.pop();
    assert_eq!(Document::from(&dfa).alphabet, None);
  }

  #[test]
  fn nfa_alphabet() {
    let nfa = Nfa::from_regex("a*b").unwrap();
    let document = Document::from(&nfa);
    assert_eq!(document.alphabet, Some(vec!["a".to_owned(), "b".to_owned()]));
    assert_eq!(document.transitions[0].label, "a, ε");
  }

  #[test]
  fn permissive_import() {
    let document = Document::from_json(r#"{
      "states": [{ "name": "A", "starting": true }, { "name": "B" }],
      "transitions": [{ "from": "A", "to": "B", "label": "a,b" }, { "from": "B" }]
    }"#).unwrap();
    let automaton = Automaton::from(document);

    assert!(automaton.states["A"].starting);
    assert!(!automaton.states["A"].accepting);
    assert_eq!(automaton.states["B"].position, None);
    assert_eq!(automaton.transitions[0].label.to_string(), "a, b");
    assert_eq!(automaton.transitions[1].to, "");

    let empty = Automaton::from(Document::from_json("{}").unwrap());
    assert_eq!(empty, Automaton::new());
  }

  #[test]
  fn round_trip() {
    let dfa = even_a();
    let json = Document::from(&dfa).to_json().unwrap();
    let imported = Dfa::from(Automaton::from(Document::from_json(&json).unwrap()));

    assert_eq!(imported, dfa);
    assert!(imported.isomorphic(&dfa));
  }

  #[test]
  fn malformed_json() {
    assert!(Document::from_json("{ \"states\": 3 }").is_err());
  }
}
