//! Error taxonomy shared by the engine boundary and the adapted handles.

use thiserror::Error;

/// Errors surfaced by a storage engine and forwarded by the adapter.
///
/// The engine produces these values itself; the adapter never rewraps or
/// reinterprets them, it only hands them to whoever awaits the deferred result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Querying or requesting quota failed.
    #[error("quota error: {0}")]
    Quota(String),

    /// The storage engine could not provide a file system.
    #[error("acquisition error: {0}")]
    Acquisition(String),

    /// A URL could not be resolved to an entry.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Metadata lookup failed.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// The destination already exists and exclusivity was required.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A non-empty directory was removed non-recursively.
    #[error("directory not empty: {0}")]
    NotEmpty(String),

    #[error("permission denied: {0}")]
    Permission(String),

    /// The engine handed out an entry that is neither a file nor a directory.
    #[error("unsupported entry kind `{kind}` for {path}")]
    UnsupportedEntryKind { path: String, kind: String },

    /// A listing page could not be fetched.
    #[error("listing error: {0}")]
    Listing(String),

    /// File content could not be read.
    #[error("read error: {0}")]
    Read(String),
}

/// Fieldless view of [`FsError`], handy for matching in callers and tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Quota,
    Acquisition,
    Resolution,
    Metadata,
    Conflict,
    NotFound,
    NotEmpty,
    Permission,
    UnsupportedEntryKind,
    Listing,
    Read,
}

impl FsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::Quota(_) => ErrorKind::Quota,
            FsError::Acquisition(_) => ErrorKind::Acquisition,
            FsError::Resolution(_) => ErrorKind::Resolution,
            FsError::Metadata(_) => ErrorKind::Metadata,
            FsError::Conflict(_) => ErrorKind::Conflict,
            FsError::NotFound(_) => ErrorKind::NotFound,
            FsError::NotEmpty(_) => ErrorKind::NotEmpty,
            FsError::Permission(_) => ErrorKind::Permission,
            FsError::UnsupportedEntryKind { .. } => ErrorKind::UnsupportedEntryKind,
            FsError::Listing(_) => ErrorKind::Listing,
            FsError::Read(_) => ErrorKind::Read,
        }
    }
}
