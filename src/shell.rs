//! Interactive command shell.
//!
//! Reads commands from the input stream, translates user-facing 1-based
//! line numbers into the engine's 0-based indices, invokes exactly one
//! engine operation per command, and renders results and errors. Engine
//! errors are printed and the loop continues; nothing here is fatal to
//! the process.
//!
//! The shell is generic over its input and output streams so tests can
//! drive whole sessions from strings.

use std::io::{self, BufRead, Write};

use linea_buffer::LineBuffer;

/// The commands the shell accepts, mapping 1:1 to engine operations.
const COMMANDS: &str = "insert, search, display, update, delete, undo, redo, exit";

/// A single interactive editing session over one buffer.
pub struct Shell<R, W> {
    engine: LineBuffer,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell driving `engine` over the given streams.
    pub fn new(engine: LineBuffer, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    /// Runs the command loop until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Line editor started (in-memory mode)")?;
        writeln!(
            self.output,
            "Maximum buffer size: {} lines",
            self.engine.max_lines()
        )?;

        loop {
            writeln!(self.output, "\nCommands: {COMMANDS}")?;
            let Some(command) = self.prompt("Enter command: ")? else {
                break;
            };

            tracing::debug!(command = %command, "dispatching");
            match command.as_str() {
                "insert" => self.cmd_insert()?,
                "search" => self.cmd_search()?,
                "display" => self.cmd_display()?,
                "update" => self.cmd_update()?,
                "delete" => self.cmd_delete()?,
                "undo" => self.cmd_undo()?,
                "redo" => self.cmd_redo()?,
                "exit" => break,
                "" => continue,
                _ => writeln!(self.output, "Invalid command")?,
            }
        }
        Ok(())
    }

    // ==================== Commands ====================

    fn cmd_insert(&mut self) -> io::Result<()> {
        let max = self.engine.max_lines();
        let Some(line) = self.prompt_number(&format!("Enter line number (1-{max}): "))? else {
            return Ok(());
        };
        if line < 1 || line > max {
            writeln!(self.output, "Error: Line number must be between 1 and {max}")?;
            return Ok(());
        }
        let Some(text) = self.prompt_raw("Enter text: ")? else {
            return Ok(());
        };

        match self.engine.insert_line(line - 1, text) {
            Ok(size) => writeln!(
                self.output,
                "Line inserted successfully. Buffer size: {size}/{max}"
            ),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn cmd_search(&mut self) -> io::Result<()> {
        let Some(word) = self.prompt("Enter word to search: ")? else {
            return Ok(());
        };
        match self.engine.search_word(&word) {
            Some(cursor) => writeln!(self.output, "Found at {cursor}"),
            None => writeln!(self.output, "Word not found"),
        }
    }

    fn cmd_display(&mut self) -> io::Result<()> {
        if self.engine.is_empty() {
            return writeln!(self.output, "Buffer is empty");
        }
        writeln!(
            self.output,
            "\nBuffer contents ({}/{} lines):",
            self.engine.len(),
            self.engine.max_lines()
        )?;
        for index in 0..self.engine.len() {
            self.display_line(index)?;
        }
        Ok(())
    }

    /// Renders one line as `Line No<N>: <content or "(empty)">`.
    fn display_line(&mut self, index: usize) -> io::Result<()> {
        if let Some(content) = self.engine.line(index) {
            let shown = if content.is_empty() { "(empty)" } else { content };
            writeln!(self.output, "Line No{}: {shown}", index + 1)?;
        }
        Ok(())
    }

    fn cmd_update(&mut self) -> io::Result<()> {
        let Some(line) = self.prompt_number("Enter line number to update: ")? else {
            return Ok(());
        };
        if line < 1 {
            writeln!(self.output, "Error: Line number must be at least 1")?;
            return Ok(());
        }
        let Some(start) = self.prompt_number("Enter starting position: ")? else {
            return Ok(());
        };
        let Some(text) = self.prompt_raw("Enter new text: ")? else {
            return Ok(());
        };

        match self.engine.update_line(line - 1, start, &text) {
            Ok(()) => writeln!(self.output, "Line updated successfully"),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn cmd_delete(&mut self) -> io::Result<()> {
        let Some(line) = self.prompt_number("Enter line number to delete: ")? else {
            return Ok(());
        };
        if line < 1 {
            writeln!(self.output, "Error: Line number must be at least 1")?;
            return Ok(());
        }

        let max = self.engine.max_lines();
        match self.engine.delete_line(line - 1) {
            Ok(size) => writeln!(
                self.output,
                "Line deleted successfully. Buffer size: {size}/{max}"
            ),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn cmd_undo(&mut self) -> io::Result<()> {
        if self.engine.undo() {
            let (size, max) = (self.engine.len(), self.engine.max_lines());
            writeln!(self.output, "Undo performed. Buffer size: {size}/{max}")
        } else {
            writeln!(self.output, "Nothing to undo")
        }
    }

    fn cmd_redo(&mut self) -> io::Result<()> {
        if self.engine.redo() {
            let (size, max) = (self.engine.len(), self.engine.max_lines());
            writeln!(self.output, "Redo performed. Buffer size: {size}/{max}")
        } else {
            writeln!(self.output, "Nothing to redo")
        }
    }

    // ==================== Prompting ====================

    /// Prints a prompt and reads one trimmed line.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        Ok(self.prompt_raw(message)?.map(|s| s.trim().to_string()))
    }

    /// Prints a prompt and reads one line verbatim (minus the line
    /// terminator). Used for text arguments, where leading and trailing
    /// whitespace is content.
    fn prompt_raw(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Prompts for a non-negative integer, reporting a parse failure to
    /// the user and returning `None` (the command is abandoned).
    fn prompt_number(&mut self, message: &str) -> io::Result<Option<usize>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.parse::<usize>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "Error: Expected a number, got '{raw}'")?;
                Ok(None)
            }
        }
    }
}
