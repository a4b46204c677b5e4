//! Interactive single-line prompt
//!
//! A [`Prompt`] shows a title, an editable text field and a hint, and returns
//! what the user typed once they press Enter, Escape or Ctrl-C. The prompt is
//! a [`Model`] driven by the runtime loop:
//! - `init` focuses the field and starts the cursor blink
//! - `update` finalizes on Enter, Escape or Ctrl-C and forwards every other message to the field
//! - `view` renders title, field and hint

use crate::{
    console::{check_console, ConsoleProbe, TerminalProbe},
    constants::QUIT_HINT,
    error::Result,
    runtime::{Backend, Cmd, CrosstermBackend, Key, Model, Msg, Program},
    textinput::TextInput,
};

pub mod parser;

pub use parser::parse_bool;

/// Configuration for a text prompt
#[derive(Debug, Clone, Default)]
pub struct PromptConfig {
    pub title: String,
    pub placeholder: Option<String>,
}

impl PromptConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), placeholder: None }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Prompt {
    title: String,
    text_input: TextInput,
    last_error: Option<String>,
    answer: String,
}

impl Prompt {
    pub fn new(config: PromptConfig) -> Self {
        let mut text_input = TextInput::new();
        text_input.set_placeholder(config.placeholder);

        Self { title: config.title, text_input, last_error: None, answer: String::new() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Last error message received by the input loop, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Asks on the attached terminal and blocks until the user finishes.
    ///
    /// Escape and Ctrl-C return the typed text just like Enter does.
    pub fn answer(&mut self) -> Result<String> {
        self.answer_with(&TerminalProbe, CrosstermBackend::stderr())
    }

    /// Same as [`Prompt::answer`], interpreted through [`parse_bool`].
    pub fn yes_or_no(&mut self) -> Result<bool> {
        self.yes_or_no_with(&TerminalProbe, CrosstermBackend::stderr())
    }

    /// Runs the prompt with an explicit console probe and backend.
    ///
    /// The loop is not started when the probe finds no console.
    pub fn answer_with<P, B>(&mut self, probe: &P, backend: B) -> Result<String>
    where
        P: ConsoleProbe + ?Sized,
        B: Backend,
    {
        check_console(probe)?;

        log::debug!("Asking: {}", self.title);
        Program::new(backend).run(self)?;

        Ok(self.answer.clone())
    }

    pub fn yes_or_no_with<P, B>(&mut self, probe: &P, backend: B) -> Result<bool>
    where
        P: ConsoleProbe + ?Sized,
        B: Backend,
    {
        let answer = self.answer_with(probe, backend)?;
        Ok(parse_bool(&answer))
    }

    fn finalize(&mut self) -> Cmd {
        self.answer = self.text_input.value();
        self.text_input.blur();
        log::debug!("Answer captured ({} chars)", self.answer.chars().count());
        Cmd::Quit
    }
}

impl Model for Prompt {
    fn init(&mut self) -> Cmd {
        self.text_input.focus()
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            // Escape and Ctrl-C submit the typed text exactly like Enter.
            Msg::Key(Key::Ctrl('c') | Key::Escape | Key::Enter) => self.finalize(),
            Msg::Error(err) => {
                log::debug!("Input loop reported an error: {err}");
                self.last_error = Some(err);
                Cmd::None
            }
            msg => self.text_input.update(&msg),
        }
    }

    fn view(&self) -> String {
        format!("{}\n\n{}\n\n{}\n\n", self.title, self.text_input.view(), QUIT_HINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BLINK_INTERVAL;

    fn prompt(title: &str) -> Prompt {
        Prompt::new(PromptConfig::new(title))
    }

    #[test]
    fn new_prompt_starts_empty() {
        let prompt = Prompt::new(PromptConfig::new("Name").with_placeholder("your name"));
        assert_eq!(prompt.title(), "Name");
        assert_eq!(prompt.text_input.placeholder(), Some("your name"));
        assert!(prompt.answer.is_empty());
        assert!(prompt.last_error().is_none());
    }

    #[test]
    fn placeholder_is_unset_when_not_given() {
        assert_eq!(prompt("Name").text_input.placeholder(), None);
    }

    #[test]
    fn init_focuses_and_schedules_blink() {
        let mut prompt = prompt("Name");
        let cmd = prompt.init();
        assert!(prompt.text_input.is_focused());
        assert_eq!(cmd, Cmd::Tick { after: BLINK_INTERVAL, msg: Msg::Blink });
    }

    #[test]
    fn terminating_keys_capture_the_value_and_quit() {
        for key in [Key::Enter, Key::Escape, Key::Ctrl('c')] {
            let mut prompt = prompt("Name");
            prompt.init();
            prompt.update(Msg::Key(Key::Char('o')));
            prompt.update(Msg::Key(Key::Char('k')));

            assert_eq!(prompt.update(Msg::Key(key)), Cmd::Quit, "{key:?}");
            assert_eq!(prompt.answer, "ok", "{key:?}");
        }
    }

    #[test]
    fn terminating_key_on_empty_field_captures_empty_answer() {
        let mut prompt = prompt("Name");
        prompt.init();
        assert_eq!(prompt.update(Msg::Key(Key::Escape)), Cmd::Quit);
        assert_eq!(prompt.answer, "");
    }

    #[test]
    fn editing_keys_leave_answer_empty() {
        let mut prompt = prompt("Name");
        prompt.init();
        for key in [Key::Char('a'), Key::Left, Key::Right, Key::Backspace, Key::Up] {
            assert_eq!(prompt.update(Msg::Key(key)), Cmd::None);
        }
        assert!(prompt.answer.is_empty());
    }

    #[test]
    fn error_messages_are_stored_without_ui_change() {
        let mut prompt = prompt("Name");
        prompt.init();
        let before = prompt.view();

        let cmd = prompt.update(Msg::Error("resize failed".to_string()));

        assert_eq!(cmd, Cmd::None);
        assert_eq!(prompt.last_error(), Some("resize failed"));
        assert_eq!(prompt.view(), before);
    }

    #[test]
    fn view_renders_title_field_and_hint_in_order() {
        let mut prompt = prompt("Delete file?");
        prompt.text_input.set_value("yes");

        let view = prompt.view();

        assert_eq!(view, "Delete file?\n\n> yes \n\n(esc to quit)\n\n");
        assert_eq!(view, prompt.view());
    }

    #[test]
    fn view_shows_placeholder_while_empty() {
        let prompt = Prompt::new(PromptConfig::new("Delete file?").with_placeholder("yes/no"));
        let view = prompt.view();
        let title = view.find("Delete file?").unwrap();
        let placeholder = view.find("es/no").unwrap();
        let hint = view.find(QUIT_HINT).unwrap();
        assert!(title < placeholder && placeholder < hint);
    }
}
