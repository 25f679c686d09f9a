//! Line-oriented user interaction.
//!
//! The interactive sessions only talk to the user through `Console`, so they can be driven by
//! stdin/stdout in the binary and by a script of lines in tests.

use crate::Result;
use anyhow::Context;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

pub trait Console {
    /// Shows `message` and reads one line of input, without the line ending. Returns `None` at
    /// the end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>>;

    /// Shows `message` followed by a newline.
    fn say(&mut self, message: &str) -> Result<()>;
}

/// A `Console` over any reader and writer, normally stdin and stdout.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R, W> StdConsole<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R, W> Console for StdConsole<R, W>
where
    R: BufRead,
    W: Write,
{
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}").context("Unable to write prompt")?;
        self.output.flush().context("Unable to flush prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Unable to read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").context("Unable to write output")
    }
}

/// A `Console` that answers prompts from a fixed list of lines and records everything shown.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Every prompt and message shown so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// The transcript as a single string, one entry per line.
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    /// Lines that were never consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        self.transcript.push(message.to_string());
        Ok(self.input.pop_front())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_console_reads_lines_until_eof() {
        let input = b"first\r\nsecond\n".as_slice();
        let mut output = Vec::new();
        let mut console = StdConsole::new(input, &mut output);
        assert_eq!(console.prompt("> ").unwrap(), Some("first".to_string()));
        assert_eq!(console.prompt("> ").unwrap(), Some("second".to_string()));
        assert_eq!(console.prompt("> ").unwrap(), None);
        console.say("bye").unwrap();
        drop(console);
        assert_eq!(String::from_utf8(output).unwrap(), "> > > bye\n");
    }

    #[test]
    fn test_scripted_console() {
        let mut console = ScriptedConsole::new(["1"]);
        assert_eq!(console.prompt("Choose: ").unwrap(), Some("1".to_string()));
        assert_eq!(console.prompt("Choose: ").unwrap(), None);
        console.say("Goodbye!").unwrap();
        assert_eq!(console.transcript().len(), 3);
        assert!(console.output().ends_with("Goodbye!"));
        assert_eq!(console.remaining(), 0);
    }
}
