//! Quota negotiation and storage acquisition in front of an engine.

use std::fmt;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::Shared;
use tracing::debug;

use crate::core::engine::{Durability, QuotaStats, StorageEngine};
use crate::core::{FsError, utils};
use crate::deferred::Deferred;
use crate::vfs::{DirectoryEntry, Entry, EntryOps};

/// Quota asked for when the caller does not say otherwise: 5 MiB.
pub const DEFAULT_MIN_QUOTA: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bytes that must be granted before the file system is acquired.
    pub min_quota: u64,
    pub durability: Durability,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_quota: DEFAULT_MIN_QUOTA,
            durability: Durability::Persistent,
        }
    }
}

impl SessionConfig {
    pub fn with_min_quota(mut self, bytes: u64) -> Self {
        self.min_quota = bytes;
        self
    }

    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }
}

/// The settled outcome of session initialization.
#[derive(Debug, Clone)]
pub struct FileSystemInfo {
    pub name: String,
    /// Quota the file system was acquired with.
    pub quota: u64,
    pub root: DirectoryEntry,
}

/// A storage session over an engine.
///
/// Initialization runs once: query usage and quota, request `min_quota` if less is
/// granted, then acquire the file system sized to the granted quota. Exactly one
/// acquisition call is made. The quota query is issued by [`StorageSession::new`];
/// the remaining steps run as soon as anything awaits the session. Every
/// operation that needs the file system waits for that single settlement, and a
/// failed initialization fails all of them with the same error; there is no retry.
///
/// ### Example
///
/// ```ignore
/// let session = StorageSession::new(engine, SessionConfig::default());
/// let root = session.get_root().await?;
/// let note = root.make_file_entry("note.txt", false).await?;
/// note.write("Hello").await?;
/// ```
pub struct StorageSession {
    engine: Rc<dyn StorageEngine>,
    config: SessionConfig,
    ready: Shared<Deferred<FileSystemInfo>>,
}

impl StorageSession {
    pub fn new(engine: Rc<dyn StorageEngine>, config: SessionConfig) -> Self {
        let ready = Self::initialize(engine.clone(), config.clone()).shared();
        Self {
            engine,
            config,
            ready,
        }
    }

    pub fn with_defaults(engine: Rc<dyn StorageEngine>) -> Self {
        Self::new(engine, SessionConfig::default())
    }

    fn initialize(
        engine: Rc<dyn StorageEngine>,
        config: SessionConfig,
    ) -> Deferred<FileSystemInfo> {
        let stats = Deferred::from_callback(|done| engine.query_usage_and_quota(done));
        stats.and_then(move |stats| async move {
            debug!(
                usage = stats.usage,
                quota = stats.quota,
                min_quota = config.min_quota,
                "quota checked"
            );
            let quota = if stats.quota < config.min_quota {
                debug!(bytes = config.min_quota, "requesting quota");
                Deferred::from_callback(|done| engine.request_quota(config.min_quota, done)).await?
            } else {
                stats.quota
            };

            let fs = Deferred::from_callback(|done| {
                engine.request_file_system(config.durability, quota, done)
            })
            .await?;
            let root = DirectoryEntry::adapt(fs.root)?;
            debug!(name = %fs.name, quota, durability = %config.durability, "file system acquired");

            Ok::<_, FsError>(FileSystemInfo {
                name: fs.name,
                quota,
                root,
            })
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The settled file system.
    pub fn ready(&self) -> Deferred<FileSystemInfo> {
        Deferred::new(self.ready.clone())
    }

    /// Granted quota, once initialization has succeeded.
    pub fn quota(&self) -> Option<u64> {
        match self.ready.peek() {
            Some(Ok(fs)) => Some(fs.quota),
            _ => None,
        }
    }

    /// The adapted root directory. Every call yields the same handle.
    pub fn get_root(&self) -> Deferred<DirectoryEntry> {
        self.ready().map(|fs| fs.root)
    }

    /// Resolves an absolute sandbox path (e.g. `/docs/note.txt`) to an adapted entry.
    ///
    /// The path is appended to the root URL minus its trailing `/` and handed to the
    /// engine's URL resolution.
    pub fn get_url(&self, path: &str) -> Deferred<Entry> {
        let engine = self.engine.clone();
        let path = path.to_owned();
        self.ready().and_then(move |fs| {
            let url = utils::rebase_url(&fs.root.to_url(), &path);
            debug!(%url, "resolving url");
            Deferred::from_callback(|done| engine.resolve_url(&url, done))
                .and_then(|raw| Deferred::ready(Entry::adapt(raw)))
        })
    }

    /// Current usage and quota, straight from the engine.
    pub fn get_statistics(&self) -> Deferred<QuotaStats> {
        Deferred::from_callback(|done| self.engine.query_usage_and_quota(done))
    }

    /// Asks the engine for `bytes` of quota; yields the granted amount.
    pub fn request_quota(&self, bytes: u64) -> Deferred<u64> {
        Deferred::from_callback(|done| self.engine.request_quota(bytes, done))
    }
}

impl fmt::Debug for StorageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSession")
            .field("config", &self.config)
            .field("quota", &self.quota())
            .finish_non_exhaustive()
    }
}
