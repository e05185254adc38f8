use std::fmt;

use crate::core::Result;
use crate::core::engine::{Completion, RawEntryRef, RawFileEntry, RawWriterRef};
use crate::deferred::Deferred;
use crate::vfs::entry::unsupported;
use crate::vfs::{EntryKind, EntryOps, FileContent};

/// An adapted file handle.
#[derive(Clone)]
pub struct FileEntry {
    raw: RawEntryRef,
}

impl FileEntry {
    /// Wraps `raw`, which must be a file.
    pub fn adapt(raw: RawEntryRef) -> Result<Self> {
        if raw.kind() != EntryKind::File || raw.as_file().is_none() {
            return Err(unsupported(&*raw));
        }
        Ok(Self { raw })
    }

    /// Snapshot of the file content, with cached reads.
    pub fn get_file(&self) -> Deferred<FileContent> {
        self.with_ops(|ops, done| ops.file(done)).map(FileContent::new)
    }

    pub fn create_writer(&self) -> Deferred<RawWriterRef> {
        self.with_ops(|ops, done| ops.create_writer(done))
    }

    /// Obtains a writer and submits `content` to it.
    ///
    /// The result settles as soon as the writer is obtained and yields this entry
    /// for chaining. It does **not** wait for the write itself to finish; use
    /// [`FileEntry::create_writer`] and the engine's own write notifications when
    /// completion matters.
    pub fn write(&self, content: impl Into<Vec<u8>>) -> Deferred<FileEntry> {
        let content = content.into();
        let entry = self.clone();
        self.create_writer().map(move |writer| {
            writer.write(content);
            entry
        })
    }

    fn ops(&self) -> Result<&dyn RawFileEntry> {
        self.raw.as_file().ok_or_else(|| unsupported(&*self.raw))
    }

    fn with_ops<T, S>(&self, start: S) -> Deferred<T>
    where
        T: 'static,
        S: FnOnce(&dyn RawFileEntry, Completion<T>),
    {
        match self.ops() {
            Ok(ops) => Deferred::from_callback(|done| start(ops, done)),
            Err(err) => Deferred::ready(Err(err)),
        }
    }
}

impl EntryOps for FileEntry {
    fn raw(&self) -> &RawEntryRef {
        &self.raw
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("path", &self.raw.full_path())
            .finish()
    }
}
