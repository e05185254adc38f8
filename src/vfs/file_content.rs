use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

use tracing::trace;

use crate::core::engine::{RawFileRef, ReadOutput, ReadRequest};
use crate::core::{FsError, Result};
use crate::deferred::Deferred;

/// At most one value per representation.
#[derive(Default)]
struct ReadCache {
    data_url: Option<Rc<str>>,
    buffer: Option<Rc<[u8]>>,
    text: Option<Rc<str>>,
}

/// File content snapshot returned by [`crate::FileEntry::get_file`].
///
/// Reads are cached per representation: the first successful read fills the cache,
/// later reads of the same representation return the cached value (the same `Rc`)
/// without touching the engine. Failed reads leave the cache empty, so the next
/// call retries. Clones share one cache.
#[derive(Clone)]
pub struct FileContent {
    raw: RawFileRef,
    cache: Rc<RefCell<ReadCache>>,
}

impl FileContent {
    pub fn new(raw: RawFileRef) -> Self {
        Self {
            raw,
            cache: Rc::new(RefCell::new(ReadCache::default())),
        }
    }

    pub fn name(&self) -> String {
        self.raw.name()
    }

    pub fn size(&self) -> u64 {
        self.raw.size()
    }

    pub fn mime_type(&self) -> String {
        self.raw.mime_type()
    }

    pub fn last_modified(&self) -> SystemTime {
        self.raw.last_modified()
    }

    pub fn read_as_data_url(&self) -> Deferred<Rc<str>> {
        self.read(
            ReadRequest::DataUrl,
            |cache| &mut cache.data_url,
            |output| match output {
                ReadOutput::DataUrl(url) => Ok(url.into()),
                other => Err(mismatch("data URL", &other)),
            },
        )
    }

    pub fn read_as_array_buffer(&self) -> Deferred<Rc<[u8]>> {
        self.read(
            ReadRequest::ArrayBuffer,
            |cache| &mut cache.buffer,
            |output| match output {
                ReadOutput::Bytes(bytes) => Ok(bytes.into()),
                other => Err(mismatch("bytes", &other)),
            },
        )
    }

    /// Reads the content as text decoded with `label` (engine default if `None`).
    ///
    /// The text cache is keyed by representation only: once text has been read, a
    /// later call returns that text whatever `label` it passes.
    pub fn read_as_text(&self, label: Option<&str>) -> Deferred<Rc<str>> {
        let request = ReadRequest::Text {
            label: label.map(str::to_owned),
        };
        self.read(
            request,
            |cache| &mut cache.text,
            |output| match output {
                ReadOutput::Text(text) => Ok(text.into()),
                other => Err(mismatch("text", &other)),
            },
        )
    }

    fn read<V>(
        &self,
        request: ReadRequest,
        slot: fn(&mut ReadCache) -> &mut Option<V>,
        decode: fn(ReadOutput) -> Result<V>,
    ) -> Deferred<V>
    where
        V: Clone + 'static,
    {
        let cached = slot(&mut self.cache.borrow_mut()).clone();
        if let Some(value) = cached {
            trace!(file = %self.raw.name(), ?request, "read cache hit");
            return Deferred::ready(Ok(value));
        }

        let cache = self.cache.clone();
        Deferred::from_callback(|done| self.raw.read(request, done)).and_then(move |output| {
            let result = decode(output).map(|value| {
                slot(&mut cache.borrow_mut()).get_or_insert_with(|| value.clone());
                value
            });
            Deferred::ready(result)
        })
    }
}

fn mismatch(expected: &str, output: &ReadOutput) -> FsError {
    let got = match output {
        ReadOutput::DataUrl(_) => "data URL",
        ReadOutput::Bytes(_) => "bytes",
        ReadOutput::Text(_) => "text",
    };
    FsError::Read(format!("expected {expected}, engine returned {got}"))
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContent")
            .field("name", &self.raw.name())
            .field("size", &self.raw.size())
            .finish_non_exhaustive()
    }
}
