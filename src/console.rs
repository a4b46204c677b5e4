//! Detection of an interactive console
//!
//! The prompt refuses to start unless a real terminal is attached. Probes
//! report their findings as a [`Result`], so no fault ever escapes them.
//!
//! [`TerminalProbe`] is stricter than "any stream is a console": keys are read
//! from stdin and frames are drawn on stderr, so both must be terminals. A
//! terminal on stdout alone is not enough.

use crate::error::{Error, Result};
use std::io::{self, IsTerminal};

/// Description of the attached terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleInfo {
    pub columns: u16,
    pub rows: u16,
}

/// Capability check for an attached terminal
pub trait ConsoleProbe {
    fn current(&self) -> Result<ConsoleInfo>;
}

impl<F> ConsoleProbe for F
where
    F: Fn() -> Result<ConsoleInfo>,
{
    fn current(&self) -> Result<ConsoleInfo> {
        self()
    }
}

/// Probes the process's own stdin and stderr; both must be terminals
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalProbe;

impl ConsoleProbe for TerminalProbe {
    fn current(&self) -> Result<ConsoleInfo> {
        if !io::stdin().is_terminal() {
            return Err(Error::ConsoleUnavailable("stdin is not a terminal".to_string()));
        }
        if !io::stderr().is_terminal() {
            return Err(Error::ConsoleUnavailable("stderr is not a terminal".to_string()));
        }

        let (columns, rows) = crossterm::terminal::size()?;
        Ok(ConsoleInfo { columns, rows })
    }
}

/// Verifies that `probe` finds a usable console.
///
/// Any probe failure is reported as [`Error::ConsoleUnavailable`].
pub fn check_console<P: ConsoleProbe + ?Sized>(probe: &P) -> Result<()> {
    match probe.current() {
        Ok(info) => {
            log::debug!("Console detected: {}x{}", info.columns, info.rows);
            Ok(())
        }
        Err(Error::ConsoleUnavailable(reason)) => {
            log::debug!("Console unavailable: {reason}");
            Err(Error::ConsoleUnavailable(reason))
        }
        Err(err) => {
            log::debug!("Console probe failed: {err}");
            Err(Error::ConsoleUnavailable(err.to_string()))
        }
    }
}
