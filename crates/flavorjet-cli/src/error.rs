//! CLI error type and exit-code mapping.

use flavorjet_core::ClusterError;
use thiserror::Error;

/// Errors surfaced by the driver.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the event stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A malformed event line.
    #[error("line {line}: {msg}")]
    Parse {
        /// 1-based line number in the input
        line: usize,
        /// What went wrong with the line
        msg: String,
    },

    /// An input particle carried a label outside the recognized set.
    ///
    /// Data validity is an ingestion concern: the core assumes labels are
    /// valid on entry, so the driver rejects bad ones before clustering.
    #[error("line {line}: unrecognized flavor label {label}")]
    InvalidLabel {
        /// 1-based line number in the input
        line: usize,
        /// The offending label
        label: i32,
    },

    /// Configuration or clustering failure from the core.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// JSON output serialization failed.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map an error to the process exit code.
///
/// 2 flags corrupt input data (parse/label problems); 1 everything else.
pub fn exit_code_for_error(err: &CliError) -> i32 {
    match err {
        CliError::Parse { .. } | CliError::InvalidLabel { .. } => 2,
        _ => 1,
    }
}
