//! Deferred-result access to callback-based, quota-governed sandboxed storage.
//!
//! ### Overview
//!
//! `sandbox-vfs-kit` sits in front of a storage engine that reports every outcome
//! through callbacks (the kind of sandboxed file system a browser or an embedding
//! host provides) and exposes it as futures.
//! The engine is described by the [`StorageEngine`] and `Raw*` traits; this crate
//! never stores anything itself.
//!
//! **Key ideas**:
//! - **Session**: [`StorageSession`] negotiates quota and acquires the file system
//!   exactly once; every operation waits for that settlement.
//! - **Adapted handles**: [`Entry`], [`FileEntry`] and [`DirectoryEntry`] wrap engine
//!   handles. Every handle an operation returns is adapted as well.
//! - **Listing**: [`DirectoryEntry::read_entries`] drains a paged cursor into one
//!   ordered `Vec`.
//! - **Content**: [`FileContent`] caches each read representation.
//!
//! Everything is single-threaded (`Rc`, local futures). There is no cancellation
//! and no timeout: a stalled engine callback stalls its [`Deferred`] forever.

mod core;
mod deferred;
mod vfs;

pub use crate::core::engine::{
    Completion, Durability, LookupOptions, Metadata, QuotaStats, RawDirectoryEntry,
    RawDirectoryReader, RawEntry, RawEntryRef, RawFile, RawFileEntry, RawFileRef,
    RawFileSystem, RawWriter, RawWriterRef, ReadOutput, ReadRequest, StorageEngine,
};
pub use crate::core::{ErrorKind, FsError, Result};
pub use deferred::Deferred;
pub use vfs::{
    DEFAULT_MIN_QUOTA, DirectoryEntry, Entry, EntryKind, EntryOps, FileContent, FileEntry,
    FileSystemInfo, SessionConfig, StorageSession,
};
