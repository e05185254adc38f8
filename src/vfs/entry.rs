use std::fmt;
use std::rc::Rc;

use crate::core::engine::{Completion, Metadata, RawEntry, RawEntryRef};
use crate::core::{FsError, Result};
use crate::deferred::Deferred;
use crate::vfs::{DirectoryEntry, FileEntry};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything else an engine may report (devices, links, ...). Never adapted.
    Other(String),
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("file"),
            EntryKind::Directory => f.write_str("directory"),
            EntryKind::Other(kind) => f.write_str(kind),
        }
    }
}

/// Operations shared by every adapted handle.
///
/// Each operation issues the engine call immediately and returns a [`Deferred`].
/// Handles produced by an operation (`move_to`, `copy_to`, `get_parent`) are
/// adapted before they are handed out, so everything reachable from an adapted
/// handle is adapted too.
pub trait EntryOps {
    /// The engine handle behind this adapted entry.
    fn raw(&self) -> &RawEntryRef;

    fn name(&self) -> String {
        self.raw().name()
    }

    fn full_path(&self) -> String {
        self.raw().full_path()
    }

    fn to_url(&self) -> String {
        self.raw().to_url()
    }

    /// True if both values wrap the very same engine handle.
    fn same_handle(&self, other: &dyn EntryOps) -> bool {
        Rc::ptr_eq(self.raw(), other.raw())
    }

    fn get_metadata(&self) -> Deferred<Metadata> {
        Deferred::from_callback(|done| self.raw().get_metadata(done))
    }

    /// Moves this entry into `parent`, optionally renaming it.
    fn move_to(&self, parent: &DirectoryEntry, new_name: Option<&str>) -> Deferred<Entry> {
        let parent = parent.raw().clone();
        let new_name = new_name.map(str::to_owned);
        adapted(|done| self.raw().move_to(parent, new_name, done))
    }

    /// Copies this entry into `parent`, optionally under a new name.
    fn copy_to(&self, parent: &DirectoryEntry, new_name: Option<&str>) -> Deferred<Entry> {
        let parent = parent.raw().clone();
        let new_name = new_name.map(str::to_owned);
        adapted(|done| self.raw().copy_to(parent, new_name, done))
    }

    fn get_parent(&self) -> Deferred<DirectoryEntry> {
        Deferred::from_callback(|done| self.raw().get_parent(done))
            .and_then(|raw| Deferred::ready(DirectoryEntry::adapt(raw)))
    }

    fn remove(&self) -> Deferred<()> {
        Deferred::from_callback(|done| self.raw().remove(done))
    }
}

/// Issues an engine call producing a handle and adapts that handle on arrival.
pub(crate) fn adapted<S>(start: S) -> Deferred<Entry>
where
    S: FnOnce(Completion<RawEntryRef>),
{
    Deferred::from_callback(start).and_then(|raw| Deferred::ready(Entry::adapt(raw)))
}

pub(crate) fn unsupported(raw: &dyn RawEntry) -> FsError {
    FsError::UnsupportedEntryKind {
        path: raw.full_path(),
        kind: raw.kind().to_string(),
    }
}

/// An adapted file-or-directory handle.
#[derive(Clone)]
pub enum Entry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

impl Entry {
    /// Wraps an engine handle according to its kind.
    ///
    /// Fails with [`FsError::UnsupportedEntryKind`] for anything that is neither a
    /// file nor a directory. Adapting the same raw handle twice yields two wrappers
    /// over one handle; nothing is wrapped twice.
    pub fn adapt(raw: RawEntryRef) -> Result<Entry> {
        match raw.kind() {
            EntryKind::Directory => DirectoryEntry::adapt(raw).map(Entry::Directory),
            EntryKind::File => FileEntry::adapt(raw).map(Entry::File),
            EntryKind::Other(_) => Err(unsupported(&*raw)),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryEntry> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }

    pub fn into_file(self) -> Option<FileEntry> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<DirectoryEntry> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }
}

impl EntryOps for Entry {
    fn raw(&self) -> &RawEntryRef {
        match self {
            Entry::File(file) => file.raw(),
            Entry::Directory(dir) => dir.raw(),
        }
    }
}

impl From<FileEntry> for Entry {
    fn from(file: FileEntry) -> Self {
        Entry::File(file)
    }
}

impl From<DirectoryEntry> for Entry {
    fn from(dir: DirectoryEntry) -> Self {
        Entry::Directory(dir)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::File(file) => fmt::Debug::fmt(file, f),
            Entry::Directory(dir) => fmt::Debug::fmt(dir, f),
        }
    }
}
