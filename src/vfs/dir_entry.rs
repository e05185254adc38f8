use std::fmt;

use crate::core::Result;
use crate::core::engine::{Completion, LookupOptions, RawDirectoryEntry, RawEntryRef};
use crate::deferred::Deferred;
use crate::vfs::entry::unsupported;
use crate::vfs::{Entry, EntryKind, EntryOps, FileEntry, listing};

/// An adapted directory handle.
#[derive(Clone)]
pub struct DirectoryEntry {
    raw: RawEntryRef,
}

impl DirectoryEntry {
    /// Wraps `raw`, which must be a directory.
    pub fn adapt(raw: RawEntryRef) -> Result<Self> {
        if raw.kind() != EntryKind::Directory || raw.as_directory().is_none() {
            return Err(unsupported(&*raw));
        }
        Ok(Self { raw })
    }

    pub fn is_root(&self) -> bool {
        self.raw.full_path() == "/"
    }

    /// Looks up (and, per `options`, creates) the file at `path`.
    ///
    /// * `NotFound` if `options.create` is false and the file is absent.
    /// * `Conflict` if `create` and `exclusive` are both set and the path exists.
    pub fn get_file_entry(&self, path: &str, options: LookupOptions) -> Deferred<FileEntry> {
        self.with_ops(|ops, done| ops.get_file(path, options, done))
            .and_then(|raw| Deferred::ready(FileEntry::adapt(raw)))
    }

    /// Creates the file at `path`; an existing file is reused unless `exclusive`.
    pub fn make_file_entry(&self, path: &str, exclusive: bool) -> Deferred<FileEntry> {
        self.get_file_entry(path, LookupOptions::create(exclusive))
    }

    /// Looks up (and, per `options`, creates) the directory at `path`.
    pub fn get_directory(&self, path: &str, options: LookupOptions) -> Deferred<DirectoryEntry> {
        self.with_ops(|ops, done| ops.get_directory(path, options, done))
            .and_then(|raw| Deferred::ready(DirectoryEntry::adapt(raw)))
    }

    pub fn make_directory(&self, path: &str, exclusive: bool) -> Deferred<DirectoryEntry> {
        self.get_directory(path, LookupOptions::create(exclusive))
    }

    /// Removes this directory together with everything below it.
    pub fn remove_recursively(&self) -> Deferred<()> {
        self.with_ops(|ops, done| ops.remove_recursively(done))
    }

    /// Lists every child, draining all pages of a fresh listing cursor.
    ///
    /// Children keep the order the engine reports them in. A failed page fails the
    /// whole listing; entries gathered from earlier pages are dropped.
    pub fn read_entries(&self) -> Deferred<Vec<Entry>> {
        match self.ops() {
            Ok(ops) => listing::read_all(ops.create_reader(), self.raw.full_path()),
            Err(err) => Deferred::ready(Err(err)),
        }
    }

    fn ops(&self) -> Result<&dyn RawDirectoryEntry> {
        self.raw.as_directory().ok_or_else(|| unsupported(&*self.raw))
    }

    fn with_ops<T, S>(&self, start: S) -> Deferred<T>
    where
        T: 'static,
        S: FnOnce(&dyn RawDirectoryEntry, Completion<T>),
    {
        match self.ops() {
            Ok(ops) => Deferred::from_callback(|done| start(ops, done)),
            Err(err) => Deferred::ready(Err(err)),
        }
    }
}

impl EntryOps for DirectoryEntry {
    fn raw(&self) -> &RawEntryRef {
        &self.raw
    }
}

impl fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("path", &self.raw.full_path())
            .finish()
    }
}
