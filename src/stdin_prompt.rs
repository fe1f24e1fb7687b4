//! Terminal implementation of the engine's confirm/prompt dialogs.

#[cfg(test)]
#[path = "stdin_prompt_test.rs"]
mod stdin_prompt_test;

use std::io::{self, BufRead, Write};

use canvas::prompt::UserPrompt;
use tracing::warn;

/// Asks on `output` and reads one line from `input`.
///
/// `assume_yes` answers confirmations without reading; a preset `answer`
/// answers the next text prompt. EOF or a read error counts as declined.
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
    answer: Option<String>,
}

impl StdinPrompt<io::StdinLock<'static>, io::Stderr> {
    #[must_use]
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, assume_yes: false, answer: None }
    }

    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    #[must_use]
    pub fn with_answer(mut self, answer: Option<String>) -> Self {
        self.answer = answer;
        self
    }

    fn ask(&mut self, message: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{message} ").and_then(|()| self.output.flush()) {
            warn!(error = %e, "could not write prompt");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_owned()),
            Err(e) => {
                warn!(error = %e, "could not read answer");
                None
            }
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> UserPrompt for StdinPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.ask(&format!("{message} [y/N]"))
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        if let Some(answer) = self.answer.take() {
            return Some(answer);
        }
        self.ask(message)
    }
}
