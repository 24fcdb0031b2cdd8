//! Per-subscription configuration.

/// What a [`Subscriber`] does with an `error` event when no error callback
/// was registered.
///
/// [`Subscriber`]: crate::subscription::Subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnhandledErrorPolicy {
    /// Drop the error silently.
    #[default]
    Ignore,

    /// Emit a `tracing` warning carrying the error message.
    Log,

    /// Panic on the delivering thread.
    Panic,
}
