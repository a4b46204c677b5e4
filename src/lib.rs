/// Handles argument parsing and the command-line entry point.
pub mod cli;

/// Detection of an interactive console.
pub mod console;

/// Constants shared across the crate.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// The interactive prompt and yes/no parsing.
pub mod prompt;

/// Event loop, backends and the model contract.
pub mod runtime;

/// Single-line editable text field.
pub mod textinput;

pub use error::{Error, Result};
pub use prompt::{parse_bool, Prompt, PromptConfig};
