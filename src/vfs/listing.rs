//! Drains a paged listing cursor into one ordered sequence of adapted entries.

use tracing::trace;

use crate::core::engine::RawDirectoryReader;
use crate::deferred::Deferred;
use crate::vfs::Entry;

/// Reads pages from `cursor` until the engine returns an empty page.
///
/// The cursor is owned by this one listing. Pages are requested strictly one after
/// another: the next request is issued only once every entry of the previous page
/// has been adapted. The first page is requested before this function returns.
pub(crate) fn read_all(
    mut cursor: Box<dyn RawDirectoryReader>,
    path: String,
) -> Deferred<Vec<Entry>> {
    let first = Deferred::from_callback(|done| cursor.read_entries(done));
    Deferred::new(async move {
        let mut entries = Vec::new();
        let mut pending = first;
        loop {
            let page = pending.await?;
            if page.is_empty() {
                trace!(%path, total = entries.len(), "listing finished");
                return Ok(entries);
            }
            trace!(%path, page_len = page.len(), "listing page");
            for raw in page {
                entries.push(Entry::adapt(raw)?);
            }
            pending = Deferred::from_callback(|done| cursor.read_entries(done));
        }
    })
}
