mod dir_entry;
mod entry;
mod file_content;
mod file_entry;
mod listing;
mod session;

pub use dir_entry::DirectoryEntry;
pub use entry::{Entry, EntryKind, EntryOps};
pub use file_content::FileContent;
pub use file_entry::FileEntry;
pub use session::{DEFAULT_MIN_QUOTA, FileSystemInfo, SessionConfig, StorageSession};
