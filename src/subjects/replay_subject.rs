use super::{
    impl_subject,
    subject_core::{SubjectCore, Window},
};

/// Specifies the buffer size for replaying previous emissions in
/// [`ReplaySubject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufSize {
    /// Specifies an infinite buffer size, allowing all emitted values to be replayed.
    Unbounded,

    /// Specifies a limited buffer size with the maximum number of values to be replayed.
    Bounded(usize),
}

/// Replaying old values to new subscribers, this variant of `Subject` emits these
/// values upon subscription.
///
/// A `ReplaySubject` records the values pushed into it, up to its buffer size,
/// and sends them to every new subscriber, oldest first, before any live
/// value. Even after completion or an error the buffered values are replayed
/// before the terminal notification.
///
/// # Examples
///
///```
/// use rxkit::{subjects::ReplaySubject, Observer, Subscribeable};
///
/// let mut subject = ReplaySubject::bounded(2);
///
/// subject.next(1);
/// subject.next(2);
/// subject.next(3);
///
/// // Replays 2 and 3, the last two values.
/// subject.subscribe_next(|v: i32| println!("{}", v));
///```
#[derive(Clone)]
pub struct ReplaySubject<T>(SubjectCore<T, Window<T>>);

impl<T: Clone + Send + 'static> ReplaySubject<T> {
    /// Creates a `ReplaySubject` whose buffer holds `buf_size` values.
    pub fn new(buf_size: BufSize) -> Self {
        let capacity = match buf_size {
            BufSize::Unbounded => None,
            BufSize::Bounded(size) => Some(size),
        };
        ReplaySubject(SubjectCore::new(Window::new(capacity)))
    }

    /// Shorthand for `ReplaySubject::new(BufSize::Bounded(size))`.
    pub fn bounded(size: usize) -> Self {
        Self::new(BufSize::Bounded(size))
    }

    /// Shorthand for `ReplaySubject::new(BufSize::Unbounded)`.
    pub fn unbounded() -> Self {
        Self::new(BufSize::Unbounded)
    }
}

impl_subject!(ReplaySubject);
