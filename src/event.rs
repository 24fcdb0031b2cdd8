use crate::errors::ProducerError;

/// A single notification pushed from a producer to an observer.
///
/// `Error` and `Completed` are terminal: once either has been delivered on a
/// subscription nothing else is delivered on it.
#[derive(Debug, Clone)]
pub enum Event<T> {
    Next(T),
    Error(ProducerError),
    Completed,
}

impl<T> Event<T> {
    /// Returns `true` for `Error` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        !self.is_next()
    }

    pub fn is_next(&self) -> bool {
        matches!(self, Event::Next(_))
    }

    /// Borrows the value carried by a `Next` event.
    pub fn value(&self) -> Option<&T> {
        match self {
            Event::Next(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Event::Next(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProducerError> {
        match self {
            Event::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn terminal_variants() {
        assert!(!Event::Next(1).is_terminal());
        assert!(Event::<i32>::Completed.is_terminal());
        assert!(Event::<i32>::Error(ProducerError::msg("x")).is_terminal());
    }

    #[test]
    fn value_accessors() {
        let e = Event::Next("a");
        assert_eq!(e.value(), Some(&"a"));
        assert_eq!(e.into_value(), Some("a"));
        assert_eq!(Event::<&str>::Completed.into_value(), None);
        assert!(Event::<()>::Error(ProducerError::msg("x")).error().is_some());
    }
}
