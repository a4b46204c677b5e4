//! Event loop driving an interactive [`Model`]
//!
//! The loop is single-threaded: it asks the [`Backend`] for the next message,
//! waiting at most until the next scheduled timer is due, hands the message to
//! the model, redraws the view and executes the returned [`Cmd`].
//!
//! - `backend`: the [`Backend`] contract and the crossterm implementation
//! - `scripted`: a backend replaying predefined messages, for automation and tests

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

pub mod backend;
pub mod scripted;

pub use backend::{Backend, CrosstermBackend};
pub use scripted::ScriptedBackend;

/// A key press as seen by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// A character pressed together with Control, always lowercase.
    Ctrl(char),
    /// A character pressed together with Alt.
    Alt(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
}

/// Messages delivered to [`Model::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Key(Key),
    /// Cursor blink timer fired.
    Blink,
    /// The terminal changed size; the loop redraws after delivering it.
    Resize { columns: u16, rows: u16 },
    /// A non-fatal error reported from inside the loop.
    Error(String),
}

/// Work a model asks the loop to perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    None,
    /// Stop the loop after drawing the current view.
    Quit,
    /// Deliver `msg` once `after` has elapsed.
    Tick { after: Duration, msg: Msg },
    Batch(Vec<Cmd>),
}

/// The contract a state holder implements to be driven by [`Program`].
pub trait Model {
    /// Called once before the first frame is drawn.
    fn init(&mut self) -> Cmd;

    /// Applies one message and returns the follow-up command.
    fn update(&mut self, msg: Msg) -> Cmd;

    /// Renders the current state. Must not have side effects.
    fn view(&self) -> String;
}

#[derive(Debug)]
struct Timer {
    due: Instant,
    msg: Msg,
}

/// Runs a [`Model`] on top of a [`Backend`] until the model quits.
pub struct Program<B: Backend> {
    backend: B,
    timers: Vec<Timer>,
}

impl<B: Backend> Program<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, timers: Vec::new() }
    }

    /// Blocks until the model returns [`Cmd::Quit`] or the backend fails.
    ///
    /// The backend is stopped on every exit path once it has started.
    pub fn run<M: Model>(&mut self, model: &mut M) -> Result<()> {
        self.backend.start().map_err(Error::RuntimeStart)?;
        log::debug!("Input loop started");

        let outcome = self.event_loop(model);
        let restored = self.backend.stop();
        self.timers.clear();
        log::debug!("Input loop stopped");

        outcome?;
        Ok(restored?)
    }

    fn event_loop<M: Model>(&mut self, model: &mut M) -> Result<()> {
        let cmd = model.init();
        self.backend.draw(&model.view())?;
        if self.execute(cmd) {
            return Ok(());
        }

        loop {
            let msg = self.next_message()?;
            log::trace!("Dispatching {msg:?}");
            let cmd = model.update(msg);
            self.backend.draw(&model.view())?;
            if self.execute(cmd) {
                return Ok(());
            }
        }
    }

    /// Returns true when the command asks the loop to quit.
    fn execute(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::None => false,
            Cmd::Quit => true,
            Cmd::Tick { after, msg } => {
                self.timers.push(Timer { due: Instant::now() + after, msg });
                false
            }
            Cmd::Batch(cmds) => {
                let mut quit = false;
                for cmd in cmds {
                    quit |= self.execute(cmd);
                }
                quit
            }
        }
    }

    fn next_message(&mut self) -> Result<Msg> {
        loop {
            let now = Instant::now();
            if let Some(index) = self.due_timer(now) {
                return Ok(self.timers.swap_remove(index).msg);
            }

            let timeout =
                self.timers.iter().map(|timer| timer.due.saturating_duration_since(now)).min();
            if let Some(msg) = self.backend.poll(timeout)? {
                return Ok(msg);
            }
        }
    }

    fn due_timer(&self, now: Instant) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| timer.due)
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts keys and quits on Enter.
    #[derive(Default)]
    struct Counter {
        keys: usize,
        blinks: usize,
        quit_on_init: bool,
    }

    impl Model for Counter {
        fn init(&mut self) -> Cmd {
            if self.quit_on_init {
                Cmd::Quit
            } else {
                Cmd::Tick { after: Duration::ZERO, msg: Msg::Blink }
            }
        }

        fn update(&mut self, msg: Msg) -> Cmd {
            match msg {
                Msg::Key(Key::Enter) => Cmd::Quit,
                Msg::Key(_) => {
                    self.keys += 1;
                    Cmd::None
                }
                Msg::Blink => {
                    self.blinks += 1;
                    Cmd::None
                }
                Msg::Error(_) | Msg::Resize { .. } => Cmd::None,
            }
        }

        fn view(&self) -> String {
            format!("keys={}", self.keys)
        }
    }

    #[test]
    fn draws_a_frame_per_transition_and_stops_on_quit() {
        let mut backend = ScriptedBackend::new().with_text("ab").with_key(Key::Enter);
        let mut model = Counter::default();

        Program::new(&mut backend).run(&mut model).unwrap();

        assert_eq!(model.keys, 2);
        assert!(backend.is_stopped());
        assert_eq!(backend.frames().first().map(String::as_str), Some("keys=0"));
        assert_eq!(backend.last_frame(), Some("keys=2"));
    }

    #[test]
    fn due_timers_are_delivered_before_polling() {
        let mut backend = ScriptedBackend::new().with_key(Key::Enter);
        let mut model = Counter::default();

        Program::new(&mut backend).run(&mut model).unwrap();

        assert_eq!(model.blinks, 1);
    }

    #[test]
    fn quit_from_init_draws_once() {
        let mut backend = ScriptedBackend::new();
        let mut model = Counter { quit_on_init: true, ..Default::default() };

        Program::new(&mut backend).run(&mut model).unwrap();

        assert_eq!(backend.frames().len(), 1);
    }

    #[test]
    fn exhausted_script_is_an_error_and_still_stops_the_backend() {
        let mut backend = ScriptedBackend::new().with_text("x");
        let mut model = Counter::default();

        let result = Program::new(&mut backend).run(&mut model);

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(backend.is_stopped());
    }

    #[test]
    fn start_failure_is_reported_without_drawing() {
        let mut backend = ScriptedBackend::new().failing_start().with_key(Key::Enter);
        let mut model = Counter::default();

        let result = Program::new(&mut backend).run(&mut model);

        assert!(matches!(result, Err(Error::RuntimeStart(_))));
        assert!(backend.frames().is_empty());
    }

    #[test]
    fn batch_commands_quit_when_any_member_quits() {
        let mut program = Program::new(ScriptedBackend::new());
        let quit = program.execute(Cmd::Batch(vec![
            Cmd::Tick { after: Duration::from_secs(60), msg: Msg::Blink },
            Cmd::Quit,
        ]));
        assert!(quit);
        assert_eq!(program.timers.len(), 1);
    }
}
