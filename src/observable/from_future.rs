use std::{error::Error, future::Future, sync::Arc};

use parking_lot::Mutex;
use tokio::runtime;

use crate::{
    errors::{ProducerError, RxError},
    observer::Observer,
    subscription::Disposable,
};

use super::Observable;

impl<T: Send + 'static> Observable<T> {
    /// Creates an observable backed by a future running as a Tokio task.
    ///
    /// Each subscription calls `make` and spawns the returned future on the
    /// current runtime. `Ok(v)` is emitted as `v` followed by completion,
    /// `Err(e)` as an error event. Disposing the subscription aborts the task.
    ///
    /// Subscribing outside of a Tokio runtime delivers
    /// [`RxError::NoRuntime`]; a panicking task delivers
    /// [`RxError::TaskFailed`].
    ///
    /// ```
    /// use rxkit::{Observable, Subscribeable};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let (tx, rx) = tokio::sync::oneshot::channel();
    ///     let mut tx = Some(tx);
    ///
    ///     let lookup = Observable::from_future(|| async {
    ///         tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    ///         Ok::<_, std::io::Error>("found")
    ///     });
    ///
    ///     let _subscription = lookup.subscribe_next(move |v| {
    ///         if let Some(tx) = tx.take() {
    ///             let _ = tx.send(v);
    ///         }
    ///     });
    ///
    ///     assert_eq!(rx.await.ok(), Some("found"));
    /// }
    /// ```
    pub fn from_future<F, Fut, E>(make: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        Observable::create(move |o| {
            let o_shared = Arc::new(Mutex::new(o));

            let handle = match runtime::Handle::try_current() {
                Ok(handle) => handle,
                Err(_) => {
                    tracing::debug!("from_future subscribed outside of a Tokio runtime");
                    o_shared.lock().error(RxError::NoRuntime.into());
                    return Disposable::empty();
                }
            };

            let future = make();
            let o_task = Arc::clone(&o_shared);
            let task = handle.spawn(async move {
                let result = future.await;
                let mut o = o_task.lock();
                match result {
                    Ok(v) => {
                        o.next(v);
                        o.complete();
                    }
                    Err(e) => o.error(ProducerError::new(e)),
                }
            });
            let abort_handle = task.abort_handle();

            // Aborted tasks are expected; only a panic is reported downstream.
            handle.spawn(async move {
                if let Err(e) = task.await {
                    if e.is_panic() {
                        tracing::warn!(error = %e, "from_future task panicked");
                        o_shared
                            .lock()
                            .error(RxError::TaskFailed(e.to_string()).into());
                    }
                }
            });

            Disposable::create(move || abort_handle.abort())
        })
    }
}
