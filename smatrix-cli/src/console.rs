//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Prompts on `output` and reads answers from `input`, one line each.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `label` and return the next non-blank line, trimmed.
    /// `None` at end of input.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// First character of the answer, lowercased.
    pub fn choice(&mut self, label: &str) -> io::Result<Option<char>> {
        Ok(self
            .ask(label)?
            .and_then(|answer| answer.chars().next())
            .map(|c| c.to_ascii_lowercase()))
    }

    /// Ask until the answer parses as `T`; `kind` names the type in the
    /// retry message.
    pub fn number<T: FromStr>(&mut self, label: &str, kind: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(label)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Enter valid {} type Number!!", kind)?,
            }
        }
    }

    /// `[Y/n]` question; end of input counts as "no".
    pub fn confirm_continue(&mut self) -> io::Result<bool> {
        loop {
            match self.choice("\n\nDo you want to continue? [Y/n] ")? {
                Some('y') => return Ok(true),
                Some('n') | None => return Ok(false),
                Some(_) => writeln!(self.output, "Invalid choice")?,
            }
        }
    }
}
