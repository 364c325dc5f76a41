use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Bad user input, nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("Error: Could not create shell script {path:?}: {source}")]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The script from the previous step is left on disk.
    #[error("Error: Could not create .desktop file {path:?}: {source}")]
    DesktopWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
#[error("Failed to remove launcher: {}", path.display())]
pub struct RemovalError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
