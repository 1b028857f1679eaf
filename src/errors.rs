//! Error types for codetally.

use crate::input::InputError;
use crate::scan::ScanError;
use crate::walker::WalkError;

/// Top-level error type for a codetally run.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

impl From<WalkError> for TallyError {
    fn from(err: WalkError) -> Self {
        TallyError::Scan(ScanError::Walk(err))
    }
}

impl TallyError {
    /// Scan failures are already described on stdout by the time they reach
    /// `main`, so they need no second message.
    pub fn is_reported(&self) -> bool {
        matches!(self, TallyError::Scan(_))
    }
}

/// Map an error to its exit code.
pub fn exit_code(error: &TallyError) -> i32 {
    match error {
        TallyError::Io(_) => 1,
        TallyError::Input(_) => 1,
        TallyError::Scan(_) => 2,
    }
}
