use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling or writing the release notes.
#[derive(Debug, Error)]
pub enum NotesError {
    /// A section parent has a kind with no known icon.
    #[error("no icon for work item kind '{kind}'")]
    MissingIcon { kind: String },

    #[error("document I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
