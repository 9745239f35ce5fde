//! Terminal implementations of the confirmation and text-input dialogs.

use std::io::{BufRead, Write};

use todo_core::Prompter;

/// Asks on `output` and reads one line per answer from `input`.
///
/// End of input, or a question that cannot be written, counts as "cancel"
/// for prompts and "no" for confirmations.
/// An empty line accepts a prompt's default.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: std::fmt::Arguments<'_>) -> bool {
        self.output
            .write_fmt(question)
            .and_then(|()| self.output.flush())
            .is_ok()
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if !self.ask(format_args!("{message} [y/N] ")) {
            return false;
        }
        self.read_line()
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        if !self.ask(format_args!("{message} [{default}] ")) {
            return None;
        }
        self.read_line().map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        })
    }
}

/// Confirms everything and accepts every default; backs `--yes`.
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    fn prompt(&mut self, _message: &str, default: &str) -> Option<String> {
        Some(default.to_string())
    }
}
