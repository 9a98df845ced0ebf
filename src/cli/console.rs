//! Line-oriented prompts over any reader and writer.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

/// A console reading answers from `input` and writing prompts to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `message` without a newline and reads one line of input.
    ///
    /// The line ending is stripped and bytes that are not valid UTF-8 become
    /// `U+FFFD`. Returns an [`io::ErrorKind::UnexpectedEof`] error once the
    /// input is exhausted.
    pub fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            // finish the prompt line so later output starts cleanly
            writeln!(self.output)?;
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }

        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Writes `message` followed by a newline.
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

#[cfg(test)]
impl<R: BufRead> Console<R, Vec<u8>> {
    /// Everything written so far.
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn prompt_writes_message_and_strips_line_ending() {
        let mut console = console("hello world\r\nsecond\n");

        assert_eq!(console.prompt("Name: ").unwrap(), "hello world");
        assert_eq!(console.prompt("Again: ").unwrap(), "second");
        assert_eq!(console.output_str(), "Name: Again: ");
    }

    #[test]
    fn prompt_keeps_inner_whitespace() {
        let mut console = console("  padded  \n");

        assert_eq!(console.prompt("> ").unwrap(), "  padded  ");
    }

    #[test]
    fn prompt_accepts_last_line_without_newline() {
        let mut console = console("last");

        assert_eq!(console.prompt("> ").unwrap(), "last");
    }

    #[test]
    fn prompt_replaces_invalid_utf8() {
        let mut console = Console::new(Cursor::new(b"caf\xe9\nnext\n".to_vec()), Vec::new());

        assert_eq!(console.prompt("> ").unwrap(), "caf\u{fffd}");
        assert_eq!(console.prompt("> ").unwrap(), "next");
    }

    #[test]
    fn prompt_on_closed_input_is_eof() {
        let mut console = console("");

        let error = console.prompt("> ").unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn say_appends_newline() {
        let mut console = console("");

        console.say("Goodbye!").unwrap();

        assert_eq!(console.output_str(), "Goodbye!\n");
    }
}
