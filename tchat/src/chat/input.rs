//! Line sources for the chat loop

use std::io::{BufRead, Write};

use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Where user turns come from
///
/// `Ok(None)` means the input is exhausted and the session should end.
pub trait InputSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive terminal input with line editing and history
pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor })
    }
}

impl InputSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl+C and Ctrl+D both end the session
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("EditorInput::read_line: end of input");
                println!();
                Ok(None)
            }
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
}

/// Plain line reader, used when stdin is not a terminal
///
/// The prompt is written to `prompt_out` before each read.
pub struct LineInput<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("LineInput::read_line: end of input");
            return Ok(None);
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_input_reads_until_eof() {
        let mut input = LineInput::new(Cursor::new("first\r\nsecond\nlast"), Vec::new());

        assert_eq!(input.read_line("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(input.read_line("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(input.read_line("> ").unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_line_input_writes_prompt() {
        let mut input = LineInput::new(Cursor::new("hi\n"), Vec::new());
        input.read_line("You: ").unwrap();

        assert_eq!(String::from_utf8(input.prompt_out).unwrap(), "You: ");
    }

    #[test]
    fn test_line_input_keeps_blank_lines() {
        let mut input = LineInput::new(Cursor::new("\n"), Vec::new());
        assert_eq!(input.read_line("").unwrap().as_deref(), Some(""));
    }
}
