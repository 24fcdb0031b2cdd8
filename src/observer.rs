use crate::{errors::ProducerError, event::Event};

/// Sink side of a stream: the capability handed to producers.
///
/// Every notification flows through [`on`](Observer::on); `next`, `error` and
/// `complete` are shorthands for the three [`Event`] variants. Producers are
/// expected to stop emitting after `error` or `complete`, but implementations
/// must tolerate (and drop) anything that arrives afterwards.
pub trait Observer {
    type NextFnType;

    /// Delivers a single event.
    fn on(&mut self, event: Event<Self::NextFnType>);

    fn next(&mut self, v: Self::NextFnType) {
        self.on(Event::Next(v));
    }

    fn error(&mut self, e: ProducerError) {
        self.on(Event::Error(e));
    }

    fn complete(&mut self) {
        self.on(Event::Completed);
    }
}
