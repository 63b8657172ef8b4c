use chainvec::{ChainVec, ChainVecError};

use crate::command::Command;

/// One live array under demonstration. [Session::apply] is the only
/// entry point; it dispatches every command onto the public [ChainVec]
/// contract and hands back what the command prints.
#[derive(Debug, Default)]
pub struct Session {
  array: ChainVec,
}

impl Session {
  /// Applies `command` and returns its output line, if it has one.
  /// `push`, `set` and `reset` are silent unless the container reports
  /// a failure.
  pub fn apply(&mut self, command: Command) -> Option<String> {
    match command {
      Command::Push(value) => match self.array.try_push(value) {
        Ok(()) => None,
        Err(error) => Some(error_line(error)),
      },
      Command::Set(index, value) => match self.array.set(index, value) {
        Ok(()) => None,
        Err(error) => Some(error_line(error)),
      },
      Command::Get(index) => match self.array.get(index) {
        Some(value) => Some(value.to_string()),
        // A missed read prints the same error line as a failed write
        None => Some(error_line(ChainVecError::IndexOutOfBounds {
          index,
          count: self.array.len(),
        })),
      },
      Command::Len => Some(self.array.len().to_string()),
      Command::Show => Some(self.array.to_string()),
      Command::Reset => {
        self.array = ChainVec::new();
        None
      }
    }
  }
}

fn error_line(error: ChainVecError) -> String {
  format!("error: {}", error)
}
