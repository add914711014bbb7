//! CLI error type wrapping MnemoError with output failures.

use mnemo_types::error::MnemoError;
use thiserror::Error;

/// Exit status for a missing subject or position.
const EXIT_NOT_FOUND: u8 = 2;
/// Exit status for bad caller input (sysexits `EX_USAGE`).
const EXIT_USAGE: u8 = 64;

#[derive(Error, Debug)]
pub enum CliError {
    /// A wrapped MnemoError.
    #[error(transparent)]
    Mnemo(#[from] MnemoError),

    /// JSON output could not be produced.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Mnemo(MnemoError::NotFound(_)) => EXIT_NOT_FOUND,
            CliError::Mnemo(MnemoError::InvalidSelector(_) | MnemoError::Config(_)) => EXIT_USAGE,
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
