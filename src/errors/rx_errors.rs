use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Failure conditions raised by `rxkit` itself.
///
/// These never cross a `subscribe` call. They reach subscribers wrapped in a
/// [`ProducerError`] like any other producer failure.
#[derive(Debug, thiserror::Error)]
pub enum RxError {
    /// An asynchronous producer was subscribed outside of a Tokio runtime.
    #[error("observable that uses Tokio tasks was subscribed outside of a Tokio runtime")]
    NoRuntime,

    /// The task driving an asynchronous producer panicked or was cancelled
    /// by the runtime.
    #[error("producer task failed: {0}")]
    TaskFailed(String),

    /// A `range` whose last value does not fit in an `i64`.
    #[error("range of {count} values starting at {start} overflows i64")]
    RangeOverflow { start: i64, count: usize },
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

/// Error value supplied by a producer through `error()`.
///
/// The payload is opaque to the core; it is shared, not copied, when a
/// subject forwards it to many observers.
#[derive(Clone)]
pub struct ProducerError(Arc<dyn Error + Send + Sync>);

impl ProducerError {
    /// Wraps any error type.
    pub fn new(e: impl Error + Send + Sync + 'static) -> Self {
        ProducerError(Arc::new(e))
    }

    /// Creates an error carrying only a message.
    pub fn msg(text: impl Into<String>) -> Self {
        ProducerError(Arc::new(Message(text.into())))
    }

    /// Returns the wrapped error if it is of type `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        let inner: &(dyn Error + 'static) = &*self.0;
        inner.downcast_ref::<E>()
    }

    /// Borrows the wrapped error.
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }
}

impl From<RxError> for ProducerError {
    fn from(e: RxError) -> Self {
        ProducerError::new(e)
    }
}

impl From<Arc<dyn Error + Send + Sync>> for ProducerError {
    fn from(e: Arc<dyn Error + Send + Sync>) -> Self {
        ProducerError(e)
    }
}

impl fmt::Debug for ProducerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProducerError").field(&self.0).finish()
    }
}

impl fmt::Display for ProducerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for ProducerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}
