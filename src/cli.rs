use getopts::Options as Opts;
use automata::{Alphabet, Automaton, BoolOp, Dfa};
use crate::{Command, Error, Options};

const COMMANDS: &str = "\
Commands:
    regex REGEX                 compile a regex to a DFA
    nfa REGEX                   compile a regex to an NFA
    determinise FILE            convert an NFA or GNFA to a DFA
    validate FILE               check that FILE is a complete DFA
    run FILE WORD...            run the DFA on each word
    minimise FILE               minimise the DFA
    invert FILE                 complement the DFA
    and|or|xor FILE FILE        product of two DFAs
    equivalent FILE FILE        compare languages
    isomorphic FILE FILE        compare structure
    witness FILE                print an accepted word
    trace FILE WORD STATE...    follow WORD state by state";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
  pub options: Options,
  pub verbose: bool,
  pub command: String,
  pub operands: Vec<String>,
}

fn opts() -> Opts {
  let mut opts = Opts::new();
  opts.optopt("a", "alphabet",
    "Symbols of the regex alphabet, e.g. `abc`. Also fixes the alphabet\n\
      for validation and for GNFA labels",
    "SYMBOLS");
  opts.optflag("", "no-minimise", "Do not minimise converted DFAs");
  opts.optflag("", "compact", "Print JSON on a single line");
  opts.optflag("v", "verbose", "Log progress to stderr");
  opts.optflag("h", "help", "Print this message");
  opts
}

pub fn usage(prog: &str) -> String {
  let brief = format!("Usage: {} [options] COMMAND ARGS...", prog);
  format!("{}\n{}\n", opts().usage(&brief), COMMANDS)
}

/// `Ok(None)` when help was asked for.
pub fn parse_args(args: &[String]) -> Result<Option<Invocation>, Error> {
  let matches = opts().parse(args).map_err(|err| Error::Usage(err.to_string()))?;

  if matches.opt_present("h") {
    return Ok(None);
  }

  let alphabet = matches.opt_str("a").map(|symbols| {
    symbols.chars()
      .filter(|c| *c != ',' && !c.is_whitespace())
      .collect::<Alphabet>()
  });

  let options = Options {
    alphabet,
    minimise: !matches.opt_present("no-minimise"),
    pretty: !matches.opt_present("compact"),
  };
  let verbose = matches.opt_present("v");

  let mut free = matches.free.into_iter();
  let command = free.next().ok_or_else(|| Error::Usage("missing command".to_owned()))?;

  Ok(Some(Invocation {
    options,
    verbose,
    command,
    operands: free.collect(),
  }))
}

impl Command {
  /// Builds a command from its name and operands, reading every FILE
  /// operand with `load`.
  pub fn parse<F>(name: &str, operands: &[String], mut load: F) -> Result<Self, Error>
    where F: FnMut(&str) -> Result<Automaton, Error>
  {
    let arity = |expected: &str, ok: bool| {
      if ok {
        Ok(())
      } else {
        Err(Error::Usage(format!("usage: {} {}", name, expected)))
      }
    };

    let command = match name {
      "regex" | "nfa" => {
        arity("REGEX", operands.len() == 1)?;
        let source = operands[0].clone();
        if name == "regex" {
          Command::Regex(source)
        } else {
          Command::Nfa(source)
        }
      }
      "determinise" => {
        arity("FILE", operands.len() == 1)?;
        Command::Determinise(load(&operands[0])?)
      }
      "validate" | "minimise" | "invert" | "witness" => {
        arity("FILE", operands.len() == 1)?;
        let dfa = Dfa::from(load(&operands[0])?);
        match name {
          "validate" => Command::Validate(dfa),
          "minimise" => Command::Minimise(dfa),
          "invert" => Command::Invert(dfa),
          _ => Command::Witness(dfa),
        }
      }
      "run" => {
        arity("FILE WORD...", !operands.is_empty())?;
        Command::Run(Dfa::from(load(&operands[0])?), operands[1..].to_vec())
      }
      "and" | "or" | "xor" | "equivalent" | "isomorphic" => {
        arity("FILE FILE", operands.len() == 2)?;
        let left = Dfa::from(load(&operands[0])?);
        let right = Dfa::from(load(&operands[1])?);
        match name {
          "and" => Command::Combine(BoolOp::And, left, right),
          "or" => Command::Combine(BoolOp::Or, left, right),
          "xor" => Command::Combine(BoolOp::Xor, left, right),
          "equivalent" => Command::Equivalent(left, right),
          _ => Command::Isomorphic(left, right),
        }
      }
      "trace" => {
        arity("FILE WORD STATE...", operands.len() >= 2)?;
        Command::Trace {
          dfa: Dfa::from(load(&operands[0])?),
          word: operands[1].clone(),
          moves: operands[2..].to_vec(),
        }
      }
      _ => return Err(Error::Usage(format!("unknown command `{}`", name))),
    };

    Ok(command)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
  }

  fn single_state(name: &str) -> Result<Automaton, Error> {
    let mut automaton = Automaton::new();
    automaton.add_state(name, true, true);
    automaton.add_transition(name, name, "a");
    Ok(automaton)
  }

  #[test]
  fn options() {
    let invocation = parse_args(&args(&["-a", "a, b", "--compact", "-v", "regex", "a*"]))
      .unwrap()
      .unwrap();
    assert_eq!(invocation, Invocation {
      options: Options {
        alphabet: Some("ab".chars().collect()),
        minimise: true,
        pretty: false,
      },
      verbose: true,
      command: "regex".to_owned(),
      operands: vec!["a*".to_owned()],
    });
  }

  #[test]
  fn defaults() {
    let invocation = parse_args(&args(&["--no-minimise", "nfa", "ab"])).unwrap().unwrap();
    assert_eq!(invocation.options.alphabet, None);
    assert!(!invocation.options.minimise);
    assert!(invocation.options.pretty);
    assert!(!invocation.verbose);
  }

  #[test]
  fn help() {
    assert_eq!(parse_args(&args(&["-h", "regex"])).unwrap(), None);
    assert!(usage("fsa").starts_with("Usage: fsa [options] COMMAND ARGS..."));
  }

  #[test]
  fn bad_command_lines() {
    assert!(matches!(parse_args(&args(&[])), Err(Error::Usage(_))));
    assert!(matches!(parse_args(&args(&["--bogus", "regex"])), Err(Error::Usage(_))));
  }

  #[test]
  fn commands() {
    let command = Command::parse("xor", &args(&["x.json", "y.json"]), |path| {
      single_state(path)
    }).unwrap();
    match command {
      Command::Combine(BoolOp::Xor, left, right) => {
        assert!(left.states.contains_key("x.json"));
        assert!(right.states.contains_key("y.json"));
      }
      other => panic!("unexpected {:?}", other),
    }

    let command = Command::parse("trace", &args(&["d.json", "ab", "A", "B"]), single_state)
      .unwrap();
    assert!(matches!(command, Command::Trace { ref word, ref moves, .. }
      if word == "ab" && moves.len() == 2));

    let command = Command::parse("run", &args(&["d.json"]), single_state).unwrap();
    assert!(matches!(command, Command::Run(_, ref words) if words.is_empty()));
  }

  #[test]
  fn arity_and_names() {
    let error = Command::parse("and", &args(&["x.json"]), single_state).unwrap_err();
    assert_eq!(error.to_string(), "usage: and FILE FILE");

    let error = Command::parse("regex", &args(&[]), single_state).unwrap_err();
    assert_eq!(error.to_string(), "usage: regex REGEX");

    let error = Command::parse("bogus", &args(&[]), single_state).unwrap_err();
    assert_eq!(error.to_string(), "unknown command `bogus`");
  }

  #[test]
  fn load_errors_propagate() {
    let error = Command::parse("witness", &args(&["missing.json"]), |path| {
      Err(Error::Usage(format!("no {}", path)))
    }).unwrap_err();
    assert_eq!(error.to_string(), "no missing.json");
  }
}
