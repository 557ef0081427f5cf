//! Step-by-step table simulation driven from outside.
//!
//! A caller that claims to know the DFA moves it one state at a time with
//! [`Tracer::move_to_state`]; each move is checked against the transition
//! table before it is taken.

use thiserror::Error;
use crate::tabular_dfa::TabularDfa;
use crate::{Dfa, ValidationError, Verdict};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
  #[error("the whole input has been read")]
  InputExhausted,
  #[error("{symbol} is not in the alphabet")]
  UnknownSymbol { symbol: char },
  #[error("there is no state named {0}")]
  UnknownState(String),
  #[error("{from} goes to {expected} on {symbol}, not {found}")]
  WrongState {
    from: String,
    symbol: char,
    expected: String,
    found: String,
  },
}

#[derive(Debug, Clone)]
pub struct Tracer {
  table: TabularDfa,
  input: Vec<char>,
  position: usize,
  current: usize,
}

impl Tracer {
  pub fn new(dfa: &Dfa, input: &str) -> Result<Self, ValidationError> {
    let table = TabularDfa::new(dfa, None)?;
    let current = table.start;
    Ok(Self {
      table,
      input: input.chars().collect(),
      position: 0,
      current,
    })
  }

  pub fn current_state(&self) -> &str {
    &self.table.names[self.current]
  }

  /// The part of the input read so far.
  pub fn consumed(&self) -> String {
    self.input[..self.position].iter().collect()
  }

  pub fn next_symbol(&self) -> Option<char> {
    self.input.get(self.position).copied()
  }

  /// Reads the next symbol, provided that `name` is where it leads.
  /// A failed move changes nothing.
  pub fn move_to_state(&mut self, name: &str) -> Result<(), TraceError> {
    let symbol = self.next_symbol().ok_or(TraceError::InputExhausted)?;
    let next = self.table.transition(self.current, symbol)
      .ok_or(TraceError::UnknownSymbol { symbol })?;
    if !self.table.names.iter().any(|state| state == name) {
      return Err(TraceError::UnknownState(name.to_owned()));
    }
    if self.table.names[next] != name {
      return Err(TraceError::WrongState {
        from: self.current_state().to_owned(),
        symbol,
        expected: self.table.names[next].clone(),
        found: name.to_owned(),
      });
    }

    self.current = next;
    self.position += 1;
    Ok(())
  }

  /// `None` until the whole input has been read.
  pub fn verdict(&self) -> Option<Verdict> {
    if self.position < self.input.len() {
      None
    } else if self.table.accepting[self.current] {
      Some(Verdict::Accept)
    } else {
      Some(Verdict::Reject)
    }
  }
}
