use std::sync::Arc;

use crate::{errors::ProducerError, event::Event};

use super::{disposable::Disposable, subscriber::Subscriber};

/// A trait for types that can be subscribed to, allowing consumers to receive
/// values emitted by an observable stream.
///
/// Implemented by [`Observable`] and by every subject. Only
/// [`subscribe`](Subscribeable::subscribe) has to be provided; the other
/// methods are shorthands that build a [`Subscriber`] for you.
///
/// [`Observable`]: crate::Observable
pub trait Subscribeable {
    /// The type of items emitted by the observable stream.
    type ObsType;

    /// Subscribes `s` and returns the `Disposable` that cancels the
    /// subscription.
    ///
    /// Never fails: producer errors are delivered to `s` as an `error` event.
    fn subscribe(&self, s: Subscriber<Self::ObsType>) -> Disposable;

    /// Subscribes a handler for emitted values only.
    fn subscribe_next(&self, next_fn: impl FnMut(Self::ObsType) + Send + 'static) -> Disposable {
        self.subscribe(Subscriber::on_next(next_fn))
    }

    /// Subscribes handlers for values, errors and completion.
    fn subscribe_all(
        &self,
        next_fn: impl FnMut(Self::ObsType) + Send + 'static,
        error_fn: impl FnMut(ProducerError) + Send + 'static,
        complete_fn: impl FnMut() + Send + 'static,
    ) -> Disposable {
        self.subscribe(Subscriber::new(next_fn, error_fn, complete_fn))
    }

    /// Subscribes a single handler that receives every notification as an
    /// [`Event`].
    fn subscribe_event(
        &self,
        event_fn: impl FnMut(Event<Self::ObsType>) + Send + 'static,
    ) -> Disposable {
        self.subscribe(Subscriber::from_event(event_fn))
    }

    /// Subscribes a value handler that borrows `context` on every call.
    ///
    /// Only a weak reference to `context` is kept, so the subscription never
    /// keeps its owner alive. Values that arrive after the last strong
    /// reference is gone are ignored.
    fn subscribe_with<C>(
        &self,
        context: &Arc<C>,
        mut next_fn: impl FnMut(&C, Self::ObsType) + Send + 'static,
    ) -> Disposable
    where
        C: Send + Sync + 'static,
    {
        let context = Arc::downgrade(context);
        self.subscribe(Subscriber::on_next(move |v| {
            if let Some(ctx) = context.upgrade() {
                next_fn(&*ctx, v);
            }
        }))
    }
}
