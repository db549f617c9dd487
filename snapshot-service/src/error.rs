use thiserror::Error;

/// Errors from invoking a `btrfs` subvolume operation.
///
/// Carries the attempted command along with whatever diagnostic output the
/// process produced, so failures surfaced through the API remain debuggable.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The `btrfs` process could not be spawned or awaited.
    #[error("btrfs command `{command}` could not run: {source}")]
    Spawn {
        /// The command that was attempted.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The `btrfs` process ran but reported a failure.
    #[error("btrfs command `{command}` failed ({status}): {output}")]
    Failed {
        /// The command that was attempted.
        command: String,
        /// The process exit status, rendered as text.
        status: String,
        /// Combined stdout and stderr of the process.
        output: String,
    },
}

/// Errors that can occur in the snapshot service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An error from the underlying volume store.
    #[error("volume error: {0}")]
    Volume(#[from] VolumeError),

    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the service layer.
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;
