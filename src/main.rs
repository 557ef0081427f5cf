use std::env;
use std::fs;
use std::process;
use automata::{Automaton, Document};
use fsa::cli::{parse_args, usage};
use fsa::{execute, report, Command, Error};

fn main() {
  let args = env::args().collect::<Vec<_>>();
  let prog = args.first().cloned().unwrap_or_else(|| "fsa".to_owned());

  let invocation = match parse_args(args.get(1..).unwrap_or_default()) {
    Ok(Some(invocation)) => invocation,
    Ok(None) => {
      print!("{}", usage(&prog));
      return;
    }
    Err(err) => {
      eprintln!("{}", report::report(&err));
      eprint!("{}", usage(&prog));
      process::exit(1);
    }
  };

  let level = if invocation.verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

  let result = Command::parse(&invocation.command, &invocation.operands, load)
    .and_then(|command| execute(&command, &invocation.options));

  match result {
    Ok(output) => println!("{}", output),
    Err(err) => {
      eprintln!("{}", report::report(&err));
      process::exit(1);
    }
  }
}

fn load(path: &str) -> Result<Automaton, Error> {
  let json = fs::read_to_string(path).map_err(|error| Error::Io {
    path: path.to_owned(),
    error,
  })?;
  Ok(Automaton::from(Document::from_json(&json)?))
}
