//! Line-based prompting
//!
//! Reads answers from any `BufRead` and writes questions to any `Write`,
//! so the interactive menu can be driven from tests.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Question/answer helper over an input and an output stream
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and read one trimmed line
    ///
    /// End of input is reported as `UnexpectedEof`.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        writeln!(self.output)?;
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer, printing each rejection
    pub fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Result<T>) -> io::Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "Error: {}\nPlease try again.\n", e)?,
            }
        }
    }

    /// Like `ask_until`, but an empty answer keeps the current value (`None`)
    pub fn ask_optional<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(
                    self.output,
                    "Error: {}\nPress Enter to keep the current value or try again.\n",
                    e
                )?,
            }
        }
    }

    /// Y/N question; anything but "y" means no
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("y"))
    }
}
