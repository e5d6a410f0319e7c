//! Prompt/answer console over any reader and writer

use anyhow::{Context, Result};
use std::io::{self, BufRead, ErrorKind, Write};

use task_manager::error::Error;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` without a newline and read one line, minus its line ending
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = match self.input.read_line(&mut line) {
                Ok(read) => read,
                // The undecodable line has been consumed; ask again
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.say("Input could not be read as text. Please try again.\n")?;
                    continue;
                }
                Err(e) => return Err(e).context("Failed to read input"),
            };
            if read == 0 {
                return Err(Error::InputClosed.into());
            }

            let trimmed = line.trim_end_matches(['\r', '\n']).len();
            line.truncate(trimmed);
            return Ok(line);
        }
    }

    /// Ask until `parse` accepts the answer, printing `retry` after each rejection
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            self.say(retry)?;
        }
    }

    /// Print one line
    pub fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_ending() {
        let mut c = console("hello world\r\nnext\n");
        assert_eq!(c.ask("> ").unwrap(), "hello world");
        assert_eq!(c.ask("> ").unwrap(), "next");
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "> > ");
    }

    #[test]
    fn test_ask_keeps_inner_whitespace() {
        let mut c = console("  padded  \n");
        assert_eq!(c.ask("").unwrap(), "  padded  ");
    }

    #[test]
    fn test_ask_eof() {
        let mut c = console("");
        let err = c.ask("> ").unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InputClosed)));
    }

    #[test]
    fn test_ask_reprompts_on_undecodable_line() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\nadmin\n".to_vec()), Vec::new());
        assert_eq!(c.ask("> ").unwrap(), "admin");

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Input could not be read as text."));
        assert_eq!(out.matches("> ").count(), 2);
    }

    #[test]
    fn test_ask_until_retries() {
        let mut c = console("x\n-3\n7\n");
        let n = c
            .ask_until("Number: ", "Try again.", |s| s.parse::<u32>().ok())
            .unwrap();
        assert_eq!(n, 7);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Try again.").count(), 2);
    }
}
