#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use clap::Parser;
use miette::{GraphicalReportHandler, Report, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use colored::*;

use crate::command::{parse_line, CommandError};
use crate::session::Session;

mod command;
mod session;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  pub file: Option<PathBuf>,
}

fn main() -> Result<()> {
  let Args { file } = Args::parse();
  let mut session = Session::default();
  match file {
    Some(file) => run_file(file, &mut session),
    None => run_interactive(&mut session),
  }
}

fn run_file(file: PathBuf, session: &mut Session) -> Result<()> {
  let source = std::fs::read_to_string(file.as_path()).unwrap();
  for line in source.lines() {
    match parse_line(line) {
      Ok(Some(command)) => {
        if let Some(output) = session.apply(command) {
          println!("{}", output);
        }
      }
      Ok(None) => (),
      // Script runs compare raw stdout against expected-output files,
      // so malformed lines are reported as plain text
      Err(error) => println!("error: {}", error),
    }
  }
  Ok(())
}

fn run_interactive(session: &mut Session) -> Result<()> {
  let mut rl = DefaultEditor::new().unwrap();
  let reporter = GraphicalReportHandler::new();

  loop {
    let readline = rl.readline("> ");
    match readline {
      Ok(line) => {
        let _ = rl.add_history_entry(line.as_str());
        match parse_line(&line) {
          Ok(Some(command)) => {
            if let Some(output) = session.apply(command) {
              println!("{}", output.cyan().dimmed());
            }
          }
          Ok(None) => (),
          Err(error) => report_error(&reporter, error, &line),
        }
      }
      Err(ReadlineError::Interrupted) => {
        println!("{}", "CTRL-C".cyan().dimmed());
      }
      Err(ReadlineError::Eof) => {
        break;
      }
      Err(err) => {
        println!("Error: {:?}", err);
        break;
      }
    }
  }
  Ok(())
}

fn report_error(reporter: &GraphicalReportHandler, error: CommandError, source: &str) {
  let report = Report::from(error).with_source_code(source.to_string());
  let mut buf = String::new();
  reporter.render_report(&mut buf, report.as_ref()).unwrap();
  println!("{}", buf);
}
