//! Terminal prompts for the interactive mode.

use crate::error::{Error, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};

/// A human on the other end of the terminal.
///
/// Asking blocks until an answer arrives; there is no timeout.
pub trait Prompter {
    /// Print informational text.
    fn show(&mut self, text: &str);

    /// Ask a question. An empty answer is allowed.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Ask a question, falling back to `default` on an empty answer.
    fn ask_or(&mut self, question: &str, default: &str) -> Result<String> {
        let answer = self.ask(question)?;
        if answer.trim().is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn show(&mut self, text: &str) {
        (**self).show(text)
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

/// Prompter backed by `dialoguer` on stdin/stdout.
///
/// When stdin is not a terminal, answers are read line by line instead, so
/// they can be piped in.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for TerminalPrompter {
    fn show(&mut self, text: &str) {
        println!("{}", text);
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            print!("{}: ", question);
            io::stdout().flush()?;
            return read_answer(&mut io::stdin().lock());
        }
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }
}

/// Read one answer line. End of input is an error, so no prompt loop spins on it.
fn read_answer<B: BufRead>(input: &mut B) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Prompt("unexpected end of input".into()));
    }
    Ok(line.trim().to_string())
}
