//! Single-line editable text field
//!
//! Holds the value, cursor position, optional placeholder, focus flag and
//! cursor blink phase. The field is driven by [`Msg`]s through
//! [`TextInput::update`] and rendered by [`TextInput::view`].

use crate::{
    constants::{BLINK_INTERVAL, DEFAULT_PROMPT},
    runtime::{Cmd, Key, Msg},
};
use crossterm::style::Stylize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TextInput {
    value: Vec<char>,
    /// Position in chars, `0..=value.len()`.
    cursor: usize,
    placeholder: Option<String>,
    focused: bool,
    cursor_visible: bool,
    blink_interval: Duration,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            placeholder: None,
            focused: false,
            cursor_visible: true,
            blink_interval: BLINK_INTERVAL,
        }
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value and moves the cursor to its end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    pub fn set_blink_interval(&mut self, interval: Duration) {
        self.blink_interval = interval;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Focuses the field and starts the cursor blink cycle
    pub fn focus(&mut self) -> Cmd {
        self.focused = true;
        self.cursor_visible = true;
        self.blink()
    }

    /// Removes focus; the blink cycle ends on its next tick
    pub fn blur(&mut self) {
        self.focused = false;
        self.cursor_visible = false;
    }

    /// Command delivering the next blink message
    pub fn blink(&self) -> Cmd {
        Cmd::Tick { after: self.blink_interval, msg: Msg::Blink }
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.focused {
            return Cmd::None;
        }

        match msg {
            Msg::Key(key) => {
                self.cursor_visible = true;
                self.handle_key(*key);
                Cmd::None
            }
            Msg::Blink => {
                self.cursor_visible = !self.cursor_visible;
                self.blink()
            }
            Msg::Error(_) | Msg::Resize { .. } => Cmd::None,
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(c) => self.insert(c),
            Key::Backspace | Key::Ctrl('h') => self.delete_before_cursor(),
            Key::Delete | Key::Ctrl('d') => self.delete_under_cursor(),
            Key::Left | Key::Ctrl('b') => self.cursor = self.cursor.saturating_sub(1),
            Key::Right | Key::Ctrl('f') => self.cursor = (self.cursor + 1).min(self.value.len()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.value.len(),
            Key::Alt('b') => self.cursor = self.word_start_before(self.cursor),
            Key::Alt('f') => self.cursor = self.word_end_after(self.cursor),
            Key::Ctrl('w') => {
                let start = self.word_start_before(self.cursor);
                self.value.drain(start..self.cursor);
                self.cursor = start;
            }
            Key::Ctrl('u') => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            Key::Ctrl('k') => self.value.truncate(self.cursor),
            _ => {}
        }
    }

    fn insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.value.remove(self.cursor);
        }
    }

    fn delete_under_cursor(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    fn word_start_before(&self, from: usize) -> usize {
        let mut pos = from;
        while pos > 0 && self.value[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.value[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    fn word_end_after(&self, from: usize) -> usize {
        let len = self.value.len();
        let mut pos = from;
        while pos < len && self.value[pos].is_whitespace() {
            pos += 1;
        }
        while pos < len && !self.value[pos].is_whitespace() {
            pos += 1;
        }
        pos
    }

    pub fn view(&self) -> String {
        let mut out = DEFAULT_PROMPT.to_string();

        if self.value.is_empty() {
            if let Some(placeholder) = self.placeholder.as_deref().filter(|p| !p.is_empty()) {
                out.push_str(&self.placeholder_view(placeholder));
                return out;
            }
        }

        out.extend(&self.value[..self.cursor]);
        let under_cursor = self.value.get(self.cursor).copied().unwrap_or(' ');
        out.push_str(&self.cursor_view(under_cursor));
        if self.cursor < self.value.len() {
            out.extend(&self.value[self.cursor + 1..]);
        }
        out
    }

    fn placeholder_view(&self, placeholder: &str) -> String {
        let mut chars = placeholder.chars();
        let mut out = String::new();
        if let Some(first) = chars.next() {
            out.push_str(&self.cursor_view(first));
        }
        let rest: String = chars.collect();
        if !rest.is_empty() {
            out.push_str(&rest.dark_grey().to_string());
        }
        out
    }

    fn cursor_view(&self, c: char) -> String {
        if self.focused && self.cursor_visible {
            c.reverse().to_string()
        } else {
            c.to_string()
        }
    }
}
