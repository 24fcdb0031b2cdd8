//! The `observable` module provides [`Observable`], the cold, lazily started
//! source of a value stream, together with its creation helpers.

mod deferred;
mod factory;
mod from_future;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    errors::ProducerError,
    observer::Observer,
    subscription::{Disposable, Subscribeable, Subscriber},
};

type SubscribeFn<T> = dyn Fn(Subscriber<T>) -> Disposable + Send + Sync;

/// The `Observable` struct represents a source of values that can be observed.
///
/// An `Observable` wraps a subscribe function. Nothing happens until
/// [`subscribe`](Subscribeable::subscribe) is called; then the function runs
/// right away, on the caller's thread, with the given [`Subscriber`]. Every
/// subscription runs the function again, so two subscribers each get the full
/// sequence independently (the observable is *cold*).
///
/// Cloning an `Observable` is cheap and shares the subscribe function.
///
/// # Example: synchronous `Observable`
///
/// ```
/// use rxkit::{Disposable, Observable, Observer, Subscribeable, Subscriber};
///
/// let observable = Observable::create(|mut subscriber| {
///     for i in 1..=3 {
///         subscriber.next(i);
///     }
///     subscriber.complete();
///
///     // Nothing to release when the subscription is disposed.
///     Disposable::empty()
/// });
///
/// observable.subscribe(
///     Subscriber::on_next(|v| println!("Emitted {}", v))
///         .with_complete(|| println!("Completed")),
/// );
/// ```
///
/// # Example: asynchronous `Observable` that can be disposed
///
/// ```
/// use std::{
///     sync::{
///         atomic::{AtomicBool, Ordering},
///         Arc,
///     },
///     time::Duration,
/// };
///
/// use rxkit::{Disposable, Observable, Observer, Subscribeable};
///
/// let observable = Observable::create(|mut o| {
///     let done = Arc::new(AtomicBool::new(false));
///     let done_c = Arc::clone(&done);
///
///     std::thread::spawn(move || {
///         for i in 0.. {
///             // Stop emitting once the subscription is disposed.
///             if done_c.load(Ordering::Acquire) {
///                 break;
///             }
///             o.next(i);
///             std::thread::sleep(Duration::from_millis(1));
///         }
///     });
///
///     Disposable::create(move || done.store(true, Ordering::Release))
/// });
///
/// let subscription = observable.subscribe_next(|v: u64| println!("{}", v));
/// std::thread::sleep(Duration::from_millis(10));
/// subscription.dispose();
/// ```
pub struct Observable<T> {
    subscribe_fn: Arc<SubscribeFn<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            subscribe_fn: Arc::clone(&self.subscribe_fn),
        }
    }
}

impl<T: 'static> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// `sf` receives the subscriber, pushes events into it now or later
    /// (possibly from another thread) and returns the `Disposable` that
    /// releases whatever it started.
    pub fn create(sf: impl Fn(Subscriber<T>) -> Disposable + Send + Sync + 'static) -> Self {
        Observable {
            subscribe_fn: Arc::new(sf),
        }
    }

    /// Creates an `Observable` whose subscribe function may fail.
    ///
    /// An `Err` returned by `sf` is delivered to the subscriber as an `error`
    /// event; it never reaches the caller of `subscribe`.
    ///
    /// ```
    /// use rxkit::{Disposable, Observable, Observer, ProducerError, Subscribeable};
    ///
    /// let parsed = Observable::try_create(|mut o| {
    ///     let n: i32 = "12x".parse().map_err(ProducerError::new)?;
    ///     o.next(n);
    ///     o.complete();
    ///     Ok(Disposable::empty())
    /// });
    ///
    /// parsed.subscribe_all(|_| {}, |e| eprintln!("{}", e), || {});
    /// ```
    pub fn try_create(
        sf: impl Fn(Subscriber<T>) -> Result<Disposable, ProducerError> + Send + Sync + 'static,
    ) -> Self {
        Observable::create(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned = Arc::clone(&o_shared);

            let forward = Subscriber::from_event(move |e| o_cloned.lock().on(e));
            match sf(forward) {
                Ok(disposable) => disposable,
                Err(e) => {
                    tracing::debug!(error = %e, "subscribe function failed");
                    o_shared.lock().error(e);
                    Disposable::empty()
                }
            }
        })
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&self, s: Subscriber<Self::ObsType>) -> Disposable {
        let lifecycle = s.lifecycle();
        let inner = (self.subscribe_fn)(s);

        let subscription = {
            let lifecycle = Arc::clone(&lifecycle);
            let inner = inner.clone();
            Disposable::create(move || {
                lifecycle.close();
                inner.dispose();
            })
        };
        // Terminating ends the subscription too.
        lifecycle.attach(inner, &subscription);
        subscription
    }
}
