//! User prompts the host provides for destructive and naming actions.

/// Blocking yes/no and free-text prompts (`window.confirm` / `window.prompt`
/// in the browser, stdin in the CLI).
pub trait UserPrompt {
    /// Ask a yes/no question. `false` means the user declined.
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for free text. `None` means the user cancelled.
    fn prompt(&mut self, message: &str) -> Option<String>;
}

/// Prompt with fixed answers, for scripted hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    pub confirm: bool,
    pub answer: Option<String>,
    /// Every message shown, in order.
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Answers yes to confirmations and `answer` to text prompts.
    #[must_use]
    pub fn accepting(answer: Option<&str>) -> Self {
        Self { confirm: true, answer: answer.map(str::to_owned), asked: Vec::new() }
    }

    /// Declines confirmations and cancels text prompts.
    #[must_use]
    pub fn declining() -> Self {
        Self::default()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_owned());
        self.confirm
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_owned());
        self.answer.clone()
    }
}
