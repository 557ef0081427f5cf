//! Command-level front end for the `automata` engine: every command reads
//! and writes interchange documents and returns its output as text.

use std::io;
use automata::{
  compile_regex, Alphabet, Automaton, BoolOp, Dfa, Document, LabelError, Nfa,
  Tracer, ValidationError,
};
use log::debug;
use syntax::{parse_regex, RegexError};
use thiserror::Error;

pub mod cli;
pub mod report;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
  /// Regex symbols; also the fixed alphabet for validation and for
  /// telling symbols from regexes in GNFA labels.
  pub alphabet: Option<Alphabet>,
  /// Minimise the DFA produced from a regex or an NFA.
  pub minimise: bool,
  /// Indented JSON output.
  pub pretty: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      alphabet: None,
      minimise: true,
      pretty: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Regex(String),
  Nfa(String),
  Determinise(Automaton),
  Validate(Dfa),
  Run(Dfa, Vec<String>),
  Minimise(Dfa),
  Invert(Dfa),
  Combine(BoolOp, Dfa, Dfa),
  Equivalent(Dfa, Dfa),
  Isomorphic(Dfa, Dfa),
  Witness(Dfa),
  Trace {
    dfa: Dfa,
    word: String,
    moves: Vec<String>,
  },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{error}")]
  Regex {
    regex: String,
    #[source]
    error: RegexError,
  },
  #[error("{0} is not in the alphabet")]
  UnknownSymbol(char),
  #[error(transparent)]
  Label(#[from] LabelError),
  #[error("invalid DFA: {0}")]
  Invalid(#[from] ValidationError),
  #[error("malformed document: {0}")]
  Json(#[from] serde_json::Error),
  #[error("cannot read {path}: {error}")]
  Io {
    path: String,
    #[source]
    error: io::Error,
  },
  #[error("{0}")]
  Usage(String),
}

pub fn execute(command: &Command, options: &Options) -> Result<String, Error> {
  match command {
    Command::Regex(source) => {
      let nfa = compile(source, options)?;
      let dfa = finish(nfa.to_dfa(), options)?;
      to_json(Document::from(&dfa), options)
    }
    Command::Nfa(source) => {
      let nfa = compile(source, options)?;
      to_json(Document::from(&nfa), options)
    }
    Command::Determinise(automaton) => {
      let nfa = Nfa::from_gnfa(automaton, options.alphabet.as_ref())?;
      let dfa = finish(nfa.to_dfa(), options)?;
      to_json(Document::from(&dfa), options)
    }
    Command::Validate(dfa) => {
      let alphabet = match &options.alphabet {
        Some(alphabet) => dfa.validate_with(alphabet)?,
        None => dfa.validate()?,
      };
      Ok(format!("valid\nalphabet: {}", join(alphabet)))
    }
    Command::Run(dfa, words) => {
      let lines = words.iter()
        .map(|word| format!("{:?}: {}", word, dfa.simulate_word(word)))
        .collect::<Vec<_>>();
      Ok(lines.join("\n"))
    }
    Command::Minimise(dfa) => to_json(Document::from(&dfa.minimise()?), options),
    Command::Invert(dfa) => to_json(Document::from(&dfa.invert()), options),
    Command::Combine(op, left, right) => {
      let product = left.combine_with(right, *op)?;
      to_json(Document::from(&product), options)
    }
    Command::Equivalent(left, right) => {
      if left.equivalent(right)? {
        return Ok("equivalent".to_owned());
      }
      match left.distinguishing_string(right)? {
        Some(witness) if left.validate()? == right.validate()? => {
          Ok(format!("not equivalent\nwitness: {:?}", witness))
        }
        _ => Ok("not equivalent: the alphabets differ".to_owned()),
      }
    }
    Command::Isomorphic(left, right) => {
      Ok(if left.isomorphic(right) { "isomorphic" } else { "not isomorphic" }.to_owned())
    }
    Command::Witness(dfa) => {
      dfa.validate()?;
      Ok(match dfa.find_accepting_string() {
        Some(witness) => format!("{:?}", witness),
        None => "empty".to_owned(),
      })
    }
    Command::Trace { dfa, word, moves } => trace(dfa, word, moves),
  }
}

fn compile(source: &str, options: &Options) -> Result<Nfa, Error> {
  let regex = parse_regex(source).map_err(|error| Error::Regex {
    regex: source.to_owned(),
    error,
  })?;

  if let Some(alphabet) = &options.alphabet {
    if let Some(&c) = regex.symbols().iter().find(|c| !alphabet.contains(c)) {
      return Err(Error::UnknownSymbol(c));
    }
  }

  Ok(compile_regex(&regex, "q"))
}

fn finish(dfa: Dfa, options: &Options) -> Result<Dfa, Error> {
  if !options.minimise {
    return Ok(dfa);
  }
  let minimal = dfa.minimise()?;
  debug!("minimised {} states to {}", dfa.states.len(), minimal.states.len());
  Ok(minimal)
}

fn trace(dfa: &Dfa, word: &str, moves: &[String]) -> Result<String, Error> {
  let mut tracer = Tracer::new(dfa, word)?;
  let mut lines = vec![];

  for name in moves {
    let from = tracer.current_state().to_owned();
    match tracer.move_to_state(name) {
      Ok(()) => lines.push(format!("{} -> {}", from, name)),
      Err(error) => lines.push(format!("{} -> {}: {}", from, name, error)),
    }
  }

  lines.push(match tracer.verdict() {
    Some(verdict) => format!("verdict: {}", verdict),
    None => format!("read {:?}, input not finished", tracer.consumed()),
  });

  Ok(lines.join("\n"))
}

fn to_json(document: Document, options: &Options) -> Result<String, Error> {
  let json = if options.pretty {
    document.to_json()?
  } else {
    document.to_json_compact()?
  };
  Ok(json)
}

fn join(alphabet: Alphabet) -> String {
  alphabet.into_iter().map(String::from).collect::<Vec<_>>().join(", ")
}
