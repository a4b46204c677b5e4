//! Constants used throughout askline

use std::time::Duration;

/// Hint rendered below the text field
pub const QUIT_HINT: &str = "(esc to quit)";

/// Prefix drawn in front of the editable value
pub const DEFAULT_PROMPT: &str = "> ";

/// Time between two cursor blink phases
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Literal answers accepted as "yes". Matching is case-sensitive and exact.
pub const TRUTHY_ANSWERS: &[&str] =
    &["1", "t", "T", "true", "TRUE", "True", "y", "Y", "yes", "Yes"];

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
