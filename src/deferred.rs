//! Single-settlement deferred results built from engine completions.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};

use crate::core::Result;
use crate::core::engine::Completion;

/// A deferred result: settles exactly once with a value or an [`crate::FsError`].
///
/// `Deferred` is a local (`!Send`) future. Adapter logic runs on one cooperative
/// event loop, so nothing here is shared across threads. There is no cancellation
/// and no timeout: dropping a `Deferred` only discards its outcome, the engine call
/// that backs it has already been issued.
#[must_use = "dropping a deferred result discards its outcome"]
pub struct Deferred<T> {
    inner: LocalBoxFuture<'static, Result<T>>,
}

impl<T: 'static> Deferred<T> {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + 'static,
    {
        Self {
            inner: future.boxed_local(),
        }
    }

    /// An already settled result.
    pub fn ready(result: Result<T>) -> Self {
        Self::new(future::ready(result))
    }

    /// Issues an engine call right away and returns its pending outcome.
    ///
    /// `start` receives the completion to hand to the engine. If the engine drops the
    /// completion without invoking it, the result never settles, the same as a
    /// callback that never fires.
    pub fn from_callback<S>(start: S) -> Self
    where
        S: FnOnce(Completion<T>),
    {
        let (tx, rx) = oneshot::channel::<Result<T>>();
        start(Box::new(move |result| {
            // the receiver may be gone if the caller stopped listening
            let _ = tx.send(result);
        }));
        Self::new(async move {
            match rx.await {
                Ok(result) => result,
                Err(oneshot::Canceled) => future::pending().await,
            }
        })
    }

    pub fn map<U, F>(self, f: F) -> Deferred<U>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        Deferred::new(self.inner.map(|result| result.map(f)))
    }

    /// Chains another fallible step once this result succeeds.
    pub fn and_then<U, F, Fut>(self, f: F) -> Deferred<U>
    where
        U: 'static,
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = Result<U>> + 'static,
    {
        Deferred::new(async move { f(self.inner.await?).await })
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}
