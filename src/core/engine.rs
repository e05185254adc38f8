//! The boundary to the externally provided storage engine.
//!
//! Every asynchronous engine operation takes a single [`Completion`] and must invoke
//! it at most once. The adapter in [`crate::vfs`] turns these calls into
//! [`crate::Deferred`] results; nothing in this module is asynchronous by itself.

use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

use crate::core::Result;
use crate::vfs::EntryKind;

/// Single-shot completion handed to an engine call. Exactly one outcome is expected.
pub type Completion<T> = Box<dyn FnOnce(Result<T>)>;

pub type RawEntryRef = Rc<dyn RawEntry>;
pub type RawFileRef = Rc<dyn RawFile>;
pub type RawWriterRef = Rc<dyn RawWriter>;

/// Whether stored data survives routine cache clearing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Durability {
    #[default]
    Persistent,
    Temporary,
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Durability::Persistent => f.write_str("persistent"),
            Durability::Temporary => f.write_str("temporary"),
        }
    }
}

/// Usage snapshot reported by the engine. Not cached by the adapter.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct QuotaStats {
    /// Bytes consumed.
    pub usage: u64,
    /// Bytes granted.
    pub quota: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub modification_time: SystemTime,
    pub size: u64,
}

/// Creation flags for `get_file` / `get_directory` lookups.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LookupOptions {
    pub create: bool,
    pub exclusive: bool,
}

impl LookupOptions {
    /// Look up an existing entry only.
    pub fn open() -> Self {
        Self::default()
    }

    /// Create the entry if missing; with `exclusive` an existing entry is a conflict.
    pub fn create(exclusive: bool) -> Self {
        Self {
            create: true,
            exclusive,
        }
    }
}

/// File system handed out by [`StorageEngine::request_file_system`].
#[derive(Clone)]
pub struct RawFileSystem {
    pub name: String,
    pub root: RawEntryRef,
}

impl fmt::Debug for RawFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFileSystem")
            .field("name", &self.name)
            .field("root", &self.root.to_url())
            .finish()
    }
}

/// Quota negotiation, file system acquisition and URL resolution.
pub trait StorageEngine {
    fn query_usage_and_quota(&self, done: Completion<QuotaStats>);

    /// Asks for `bytes` of quota. Completes with the granted amount.
    fn request_quota(&self, bytes: u64, done: Completion<u64>);

    fn request_file_system(
        &self,
        durability: Durability,
        size: u64,
        done: Completion<RawFileSystem>,
    );

    /// Resolves an absolute URL (as produced by [`RawEntry::to_url`]) to a handle.
    fn resolve_url(&self, url: &str, done: Completion<RawEntryRef>);
}

/// Operations shared by every entry handle.
pub trait RawEntry {
    fn name(&self) -> String;

    /// Absolute path inside the sandbox, e.g. `/docs/note.txt`.
    fn full_path(&self) -> String;

    fn to_url(&self) -> String;

    fn kind(&self) -> EntryKind;

    fn get_metadata(&self, done: Completion<Metadata>);

    fn move_to(&self, parent: RawEntryRef, new_name: Option<String>, done: Completion<RawEntryRef>);

    fn copy_to(&self, parent: RawEntryRef, new_name: Option<String>, done: Completion<RawEntryRef>);

    fn get_parent(&self, done: Completion<RawEntryRef>);

    fn remove(&self, done: Completion<()>);

    /// File operations, if this handle is a file.
    fn as_file(&self) -> Option<&dyn RawFileEntry> {
        None
    }

    /// Directory operations, if this handle is a directory.
    fn as_directory(&self) -> Option<&dyn RawDirectoryEntry> {
        None
    }
}

pub trait RawFileEntry {
    /// Snapshot of the file content.
    fn file(&self, done: Completion<RawFileRef>);

    fn create_writer(&self, done: Completion<RawWriterRef>);
}

pub trait RawDirectoryEntry {
    fn get_file(&self, path: &str, options: LookupOptions, done: Completion<RawEntryRef>);

    fn get_directory(&self, path: &str, options: LookupOptions, done: Completion<RawEntryRef>);

    fn remove_recursively(&self, done: Completion<()>);

    /// Creates a fresh listing cursor positioned before the first page.
    fn create_reader(&self) -> Box<dyn RawDirectoryReader>;
}

/// Paged listing cursor. An empty page marks the end of the listing.
pub trait RawDirectoryReader {
    fn read_entries(&mut self, done: Completion<Vec<RawEntryRef>>);
}

/// Representation requested from [`RawFile::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadRequest {
    DataUrl,
    ArrayBuffer,
    Text { label: Option<String> },
}

/// Decoded result carried by a finished read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutput {
    DataUrl(String),
    Bytes(Vec<u8>),
    Text(String),
}

/// File content object returned by [`RawFileEntry::file`].
pub trait RawFile {
    fn name(&self) -> String;

    fn size(&self) -> u64;

    fn mime_type(&self) -> String;

    fn last_modified(&self) -> SystemTime;

    /// Starts a read in the requested representation.
    fn read(&self, request: ReadRequest, done: Completion<ReadOutput>);
}

/// Writer returned by [`RawFileEntry::create_writer`].
pub trait RawWriter {
    /// Submits `data` at the current position. Completion is reported by the engine
    /// through its own channels, not to the caller.
    fn write(&self, data: Vec<u8>);

    fn seek(&self, offset: u64);

    fn truncate(&self, size: u64);

    fn length(&self) -> u64;

    fn position(&self) -> u64;
}
