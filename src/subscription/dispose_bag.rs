use parking_lot::Mutex;

use super::disposable::Disposable;

/// Owns a group of [`Disposable`]s and releases them together.
///
/// The bag is meant to live exactly as long as the scope it belongs to (a
/// session, a connection, a request handler). When it is dropped, or when
/// [`dispose`](DisposeBag::dispose) is called, every held `Disposable` is
/// disposed once, in the order it was inserted. Anything inserted after
/// that is disposed on the spot.
///
/// ```
/// use rxkit::{of, DisposeBag, Subscribeable};
///
/// let bag = DisposeBag::new();
///
/// of!(1, 2, 3)
///     .subscribe_next(|v| println!("{}", v))
///     .disposed_by(&bag);
///
/// // Everything in `bag` is disposed here.
/// drop(bag);
/// ```
pub struct DisposeBag {
    disposables: Mutex<Option<Vec<Disposable>>>,
}

impl DisposeBag {
    pub fn new() -> Self {
        DisposeBag {
            disposables: Mutex::new(Some(Vec::with_capacity(8))),
        }
    }

    /// Adds `disposable` to the bag, or disposes it immediately if the bag
    /// has already been disposed.
    pub fn insert(&self, disposable: Disposable) {
        let mut held = self.disposables.lock();
        if let Some(v) = held.as_mut() {
            v.push(disposable);
            return;
        }
        drop(held);
        tracing::trace!("disposable inserted into a disposed bag, disposing it now");
        disposable.dispose();
    }

    /// Disposes every held `Disposable`. Later calls do nothing.
    pub fn dispose(&self) {
        // Taken before disposing so cleanup code may touch this bag again.
        let held = self.disposables.lock().take();
        if let Some(v) = held {
            tracing::trace!(count = v.len(), "disposing bag");
            for d in v {
                d.dispose();
            }
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposables.lock().is_none()
    }

    /// Returns the number of held disposables.
    pub fn len(&self) -> usize {
        self.disposables.lock().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DisposeBag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}
