use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Weak,
    },
};

use parking_lot::Mutex;
use tokio::runtime;

use super::dispose_bag::DisposeBag;

/// Cleanup executed when a [`Disposable`] is disposed.
pub enum DisposeLogic {
    /// Nothing to release.
    Nil,

    /// Dispose another `Disposable`, typically one returned by an inner
    /// subscription.
    Wrapped(Box<Disposable>),

    /// Cleanup defined by a function.
    Logic(Box<dyn FnOnce() + Send>),

    /// Asynchronous cleanup. The future is spawned on the Tokio runtime that
    /// was current when the `Disposable` was created.
    Future(Pin<Box<dyn Future<Output = ()> + Send>>),
}

impl DisposeLogic {
    fn run(self, runtime_handle: Option<&runtime::Handle>) {
        match self {
            DisposeLogic::Nil => (),
            DisposeLogic::Logic(fnc) => fnc(),
            DisposeLogic::Wrapped(disposable) => disposable.dispose(),
            DisposeLogic::Future(future) => match runtime_handle {
                Some(handle) => {
                    handle.spawn(future);
                }
                None => {
                    tracing::warn!(
                        "asynchronous dispose logic dropped: no Tokio runtime was current when the disposable was created"
                    );
                }
            },
        }
    }
}

struct Inner {
    disposed: AtomicBool,
    logic: Mutex<DisposeLogic>,
    runtime_handle: Option<runtime::Handle>,
}

/// Handle to a cancellable subscription or any other releasable resource.
///
/// `dispose` runs the cleanup at most once, however many times and from
/// however many threads it is called. Clones share the same cleanup and the
/// same disposed flag. Dropping a `Disposable` does **not** dispose it; put it
/// in a [`DisposeBag`] to tie it to a scope.
#[derive(Clone)]
pub struct Disposable(Arc<Inner>);

impl Disposable {
    /// Creates a `Disposable` with the given cleanup.
    pub fn new(logic: DisposeLogic) -> Self {
        let runtime_handle = match logic {
            DisposeLogic::Future(_) => runtime::Handle::try_current().ok(),
            _ => None,
        };
        Disposable(Arc::new(Inner {
            disposed: AtomicBool::new(false),
            logic: Mutex::new(logic),
            runtime_handle,
        }))
    }

    /// Creates a `Disposable` running `action` on disposal.
    pub fn create(action: impl FnOnce() + Send + 'static) -> Self {
        Self::new(DisposeLogic::Logic(Box::new(action)))
    }

    /// Creates a `Disposable` with no cleanup, for producers that hold
    /// nothing.
    pub fn empty() -> Self {
        Self::new(DisposeLogic::Nil)
    }

    /// Runs the cleanup if it has not run yet.
    pub fn dispose(&self) {
        if self.0.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let logic = std::mem::replace(&mut *self.0.logic.lock(), DisposeLogic::Nil);
        logic.run(self.0.runtime_handle.as_ref());
    }

    pub fn is_disposed(&self) -> bool {
        self.0.disposed.load(Ordering::Acquire)
    }

    /// Hands this `Disposable` over to `bag`.
    pub fn disposed_by(self, bag: &DisposeBag) {
        bag.insert(self);
    }

    pub(crate) fn downgrade(&self) -> WeakDisposable {
        WeakDisposable(Arc::downgrade(&self.0))
    }
}

/// Non-owning reference to a [`Disposable`].
pub(crate) struct WeakDisposable(Weak<Inner>);

impl WeakDisposable {
    pub(crate) fn upgrade(&self) -> Option<Disposable> {
        self.0.upgrade().map(Disposable)
    }
}

impl Default for Disposable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
