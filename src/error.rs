use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No interactive terminal is attached, or probing for one failed.
    #[error("Console is not available: {0}.")]
    ConsoleUnavailable(String),

    /// The terminal backend could not be prepared for the input loop.
    #[error("Failed to start the prompt. Original error: {0}")]
    RuntimeStart(#[source] std::io::Error),

    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output. Original error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with askline's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
