//! Backend that replays predefined messages instead of reading a terminal
//!
//! Useful for automation, testing, or CI/CD environments where no console is
//! attached. Every drawn frame is recorded so callers can inspect the output.

use super::{Backend, Key, Msg};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    messages: VecDeque<Msg>,
    frames: Vec<String>,
    fail_start: bool,
    started: bool,
    stopped: bool,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary message
    pub fn with_msg(mut self, msg: Msg) -> Self {
        self.messages.push_back(msg);
        self
    }

    /// Queue a single key press
    pub fn with_key(self, key: Key) -> Self {
        self.with_msg(Msg::Key(key))
    }

    /// Queue one key press per character of `text`
    pub fn with_text(mut self, text: &str) -> Self {
        self.messages.extend(text.chars().map(|c| Msg::Key(Key::Char(c))));
        self
    }

    /// Make `start` fail, as a terminal refusing raw mode would
    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Messages that were queued but never consumed
    pub fn remaining(&self) -> usize {
        self.messages.len()
    }
}

impl Backend for ScriptedBackend {
    fn start(&mut self) -> io::Result<()> {
        if self.fail_start {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "scripted backend refused to start",
            ));
        }
        self.started = true;
        Ok(())
    }

    fn poll(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Msg>> {
        match self.messages.pop_front() {
            Some(msg) => Ok(Some(msg)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "script ran out of messages",
            )),
        }
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.stopped = true;
        Ok(())
    }
}
