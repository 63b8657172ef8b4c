use std::iter::Peekable;
use std::str::CharIndices;

use miette::{Diagnostic, SourceOffset, SourceSpan};
use thiserror::Error;

use chainvec::Value;

/// A byte range into one line of driver input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub start: u32,
  pub end: u32,
}

impl Span {
  pub fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }
}

impl From<Span> for SourceSpan {
  fn from(value: Span) -> Self {
    SourceSpan::new(
      SourceOffset::from(value.start as usize),
      SourceOffset::from((value.end - value.start) as usize),
    )
  }
}

/// One parsed driver command. Every command maps onto a single call of
/// the public [chainvec] contract, plus `reset` for starting over.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Push(Value),
  Set(usize, Value),
  Get(usize),
  Len,
  Show,
  Reset,
}

#[derive(Debug, Error, Diagnostic)]
pub enum CommandError {
  #[error("unknown command `{0}`")]
  UnknownCommand(String, #[label] Span),
  #[error("`{0}` expects {1}")]
  MissingArgument(&'static str, &'static str, #[label] Span),
  #[error("invalid index `{0}`")]
  InvalidIndex(String, #[label] Span),
  #[error("unterminated string literal")]
  UnterminatedString(#[label] Span),
  #[error("trailing input `{0}`")]
  TrailingInput(String, #[label] Span),
}

/// Parses one line of input. Blank lines and lines whose first field
/// starts with `#` carry no command and parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
  let trimmed = line.trim_start();
  if trimmed.is_empty() || trimmed.starts_with('#') {
    return Ok(None);
  }

  let mut scanner = Scanner::new(line);
  let Some(keyword) = scanner.next_token()? else {
    return Ok(None);
  };
  if keyword.quoted {
    return Err(CommandError::UnknownCommand(
      keyword.text.to_string(),
      keyword.span,
    ));
  }

  let command = match keyword.text {
    "push" => Command::Push(expect_value(&mut scanner, "push", keyword.span)?),
    "set" => {
      let index = expect_index(&mut scanner, "set", keyword.span)?;
      let value = expect_value(&mut scanner, "set", keyword.span)?;
      Command::Set(index, value)
    }
    "get" => Command::Get(expect_index(&mut scanner, "get", keyword.span)?),
    "len" => Command::Len,
    "show" => Command::Show,
    "reset" => Command::Reset,
    _ => {
      return Err(CommandError::UnknownCommand(
        keyword.text.to_string(),
        keyword.span,
      ))
    }
  };

  match scanner.next_token()? {
    Some(extra) => Err(CommandError::TrailingInput(
      extra.text.to_string(),
      extra.span,
    )),
    None => Ok(Some(command)),
  }
}

fn expect_value(
  scanner: &mut Scanner<'_>,
  command: &'static str,
  at: Span,
) -> Result<Value, CommandError> {
  match scanner.next_token()? {
    Some(token) => Ok(classify_value(&token)),
    None => Err(CommandError::MissingArgument(command, "a value", at)),
  }
}

fn expect_index(
  scanner: &mut Scanner<'_>,
  command: &'static str,
  at: Span,
) -> Result<usize, CommandError> {
  let Some(token) = scanner.next_token()? else {
    return Err(CommandError::MissingArgument(command, "an index", at));
  };
  if token.quoted {
    return Err(CommandError::InvalidIndex(
      token.text.to_string(),
      token.span,
    ));
  }
  token
    .text
    .parse()
    .map_err(|_| CommandError::InvalidIndex(token.text.to_string(), token.span))
}

/// Maps one field onto the element value it denotes: quoted text is
/// always text, an `i64` lexeme is an integer, a numeric lexeme with a
/// fractional or exponent part is a float, and any other bare word is
/// text again.
fn classify_value(token: &Token<'_>) -> Value {
  if token.quoted {
    return Value::from(token.text);
  }
  if let Ok(int) = token.text.parse::<i64>() {
    return Value::Int(int);
  }
  if looks_numeric(token.text) {
    if let Ok(float) = token.text.parse::<f64>() {
      return Value::Float(float);
    }
  }
  Value::from(token.text)
}

/// Guards the float fallback so bare words like `inf` stay text.
fn looks_numeric(text: &str) -> bool {
  text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
  text: &'a str,
  quoted: bool,
  span: Span,
}

/// Splits one line into whitespace-separated fields, keeping the byte
/// span of every field for diagnostics. Double quotes delimit a field
/// that may contain whitespace; there are no escape sequences.
struct Scanner<'a> {
  line: &'a str,
  chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
  fn new(line: &'a str) -> Scanner<'a> {
    Scanner {
      line,
      chars: line.char_indices().peekable(),
    }
  }

  fn next_token(&mut self) -> Result<Option<Token<'a>>, CommandError> {
    while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    let Some((start, first)) = self.chars.next() else {
      return Ok(None);
    };

    if first == '"' {
      return self.finish_quoted(start).map(Some);
    }

    let mut end = self.line.len();
    while let Some(&(pos, c)) = self.chars.peek() {
      if c.is_whitespace() {
        end = pos;
        break;
      }
      self.chars.next();
    }
    Ok(Some(Token {
      text: &self.line[start..end],
      quoted: false,
      span: Span::new(start as u32, end as u32),
    }))
  }

  /// Scans the rest of a string literal whose opening quote sits at
  /// byte `start`.
  fn finish_quoted(&mut self, start: usize) -> Result<Token<'a>, CommandError> {
    for (pos, c) in self.chars.by_ref() {
      if c == '"' {
        return Ok(Token {
          text: &self.line[start + 1..pos],
          quoted: true,
          span: Span::new(start as u32, (pos + 1) as u32),
        });
      }
    }
    Err(CommandError::UnterminatedString(Span::new(
      start as u32,
      self.line.len() as u32,
    )))
  }
}
