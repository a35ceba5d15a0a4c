//! Setup-time error types.
//!
//! `ConfigError` is raised during engine construction and must abort
//! startup. Per-request authentication failures are never errors — they
//! surface as [`Decision::Challenge`](crate::Decision::Challenge).

use std::path::PathBuf;

/// Fatal configuration error, raised before any request is served.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Credential file could not be opened or read.
    #[error("credential file {path} is unreadable: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
