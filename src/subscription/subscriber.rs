use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use parking_lot::Mutex;

use crate::{
    config::UnhandledErrorPolicy, errors::ProducerError, event::Event, observer::Observer,
};

use super::disposable::{Disposable, WeakDisposable};

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type ErrorFn = Box<dyn FnMut(ProducerError) + Send>;
type CompleteFn = Box<dyn FnMut() + Send>;
type EventFn<T> = Box<dyn FnMut(Event<T>) + Send>;
type DisposedFn = Box<dyn FnOnce() + Send>;

/// Teardown registered for a subscription once its `subscribe` call returns.
enum Teardown {
    Pending,
    Attached {
        producer: Disposable,
        subscription: WeakDisposable,
    },
    Finished,
}

/// State shared between a `Subscriber` and the `Disposable` returned for it.
///
/// `closed` is set by disposal and checked before every delivery; the
/// `on_disposed` hook is taken by whichever of disposal or termination comes
/// first. A terminal event also disposes the attached teardown, so the
/// subscription ends the same way as if it had been disposed.
pub(crate) struct Lifecycle {
    closed: AtomicBool,
    on_disposed: Mutex<Option<DisposedFn>>,
    teardown: Mutex<Teardown>,
}

impl Lifecycle {
    fn new() -> Self {
        Lifecycle {
            closed: AtomicBool::new(false),
            on_disposed: Mutex::new(None),
            teardown: Mutex::new(Teardown::Pending),
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stops all further delivery and fires `on_disposed` if it has not
    /// fired yet.
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.fire_disposed();
    }

    /// Registers what to dispose when the subscriber terminates. If it
    /// already has, both are disposed right away.
    ///
    /// A later call replaces an earlier one; nested subscriptions attach the
    /// outer `subscription` with the inner one as its `producer`.
    pub(crate) fn attach(&self, producer: Disposable, subscription: &Disposable) {
        let mut teardown = self.teardown.lock();
        if let Teardown::Finished = *teardown {
            drop(teardown);
            producer.dispose();
            subscription.dispose();
            return;
        }
        *teardown = Teardown::Attached {
            producer,
            subscription: subscription.downgrade(),
        };
    }

    /// Called once a terminal event has been handled.
    fn finish(&self) {
        self.fire_disposed();
        let teardown = std::mem::replace(&mut *self.teardown.lock(), Teardown::Finished);
        if let Teardown::Attached {
            producer,
            subscription,
        } = teardown
        {
            producer.dispose();
            if let Some(subscription) = subscription.upgrade() {
                subscription.dispose();
            }
        }
    }

    fn fire_disposed(&self) {
        let hook = self.on_disposed.lock().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}

/// A set of callbacks consuming the events of one subscription.
///
/// Every callback is optional; missing ones are no-ops, except a missing
/// error callback which falls back to the subscriber's
/// [`UnhandledErrorPolicy`]. Callbacks are either split (`next`, `error`,
/// `complete`) or a single closure over [`Event`].
///
/// A `Subscriber` drops everything that arrives after a terminal event and
/// everything that arrives after its subscription has been disposed.
///
/// ```
/// use rxkit::{Observable, Subscribeable, Subscriber};
///
/// let observable = Observable::just("Hello World");
///
/// observable.subscribe(
///     Subscriber::on_next(|v| println!("{}", v))
///         .with_complete(|| println!("completed"))
///         .with_disposed(|| println!("disposed")),
/// );
/// ```
pub struct Subscriber<NextFnType> {
    next_fn: Option<NextFn<NextFnType>>,
    error_fn: Option<ErrorFn>,
    complete_fn: Option<CompleteFn>,
    event_fn: Option<EventFn<NextFnType>>,
    unhandled_error: UnhandledErrorPolicy,
    stopped: bool,
    lifecycle: Arc<Lifecycle>,
}

impl<NextFnType> Subscriber<NextFnType> {
    /// Creates a `Subscriber` with handlers for values, errors and completion.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + Send + 'static,
        error_fn: impl FnMut(ProducerError) + Send + 'static,
        complete_fn: impl FnMut() + Send + 'static,
    ) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            error_fn: Some(Box::new(error_fn)),
            complete_fn: Some(Box::new(complete_fn)),
            ..Self::empty()
        }
    }

    /// Creates a `Subscriber` that only handles emitted values.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + Send + 'static) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            ..Self::empty()
        }
    }

    /// Creates a `Subscriber` that receives every notification as an [`Event`].
    ///
    /// Errors delivered this way count as handled.
    pub fn from_event(event_fn: impl FnMut(Event<NextFnType>) + Send + 'static) -> Self {
        Subscriber {
            event_fn: Some(Box::new(event_fn)),
            ..Self::empty()
        }
    }

    /// Creates a `Subscriber` with no callbacks at all.
    pub fn empty() -> Self {
        Subscriber {
            next_fn: None,
            error_fn: None,
            complete_fn: None,
            event_fn: None,
            unhandled_error: UnhandledErrorPolicy::default(),
            stopped: false,
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    /// Sets the error callback.
    #[must_use]
    pub fn with_error(mut self, error_fn: impl FnMut(ProducerError) + Send + 'static) -> Self {
        self.error_fn = Some(Box::new(error_fn));
        self
    }

    /// Sets the completion callback.
    #[must_use]
    pub fn with_complete(mut self, complete_fn: impl FnMut() + Send + 'static) -> Self {
        self.complete_fn = Some(Box::new(complete_fn));
        self
    }

    /// Sets a callback that runs once, when the subscription is disposed or
    /// right after it receives its terminal event, whichever comes first.
    #[must_use]
    pub fn with_disposed(self, disposed_fn: impl FnOnce() + Send + 'static) -> Self {
        *self.lifecycle.on_disposed.lock() = Some(Box::new(disposed_fn));
        self
    }

    /// Chooses what happens to an error when no error callback is set.
    #[must_use]
    pub fn with_unhandled_error(mut self, policy: UnhandledErrorPolicy) -> Self {
        self.unhandled_error = policy;
        self
    }

    /// Returns `true` once a terminal event has been received.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn lifecycle(&self) -> Arc<Lifecycle> {
        Arc::clone(&self.lifecycle)
    }

    fn handle_unhandled(&self, e: ProducerError) {
        match self.unhandled_error {
            UnhandledErrorPolicy::Ignore => (),
            UnhandledErrorPolicy::Log => {
                tracing::warn!(error = %e, "observable emitted an error with no error handler");
            }
            UnhandledErrorPolicy::Panic => {
                panic!("observable emitted an unhandled error: {}", e);
            }
        }
    }
}

impl<T> Default for Subscriber<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Observer for Subscriber<T> {
    type NextFnType = T;

    fn on(&mut self, event: Event<T>) {
        if self.stopped || self.lifecycle.is_closed() {
            return;
        }
        let terminal = event.is_terminal();
        if terminal {
            self.stopped = true;
        }

        if let Some(efn) = &mut self.event_fn {
            efn(event);
        } else {
            match event {
                Event::Next(v) => {
                    if let Some(nfn) = &mut self.next_fn {
                        nfn(v);
                    }
                }
                Event::Error(e) => {
                    if let Some(efn) = &mut self.error_fn {
                        efn(e);
                    } else {
                        self.handle_unhandled(e);
                    }
                }
                Event::Completed => {
                    if let Some(cfn) = &mut self.complete_fn {
                        cfn();
                    }
                }
            }
        }

        if terminal {
            self.lifecycle.finish();
        }
    }
}
