use super::{
    impl_subject,
    subject_core::{Latest, SubjectCore},
};

/// A subject that stores the latest value emitted to it and hands it to every
/// new subscriber immediately.
///
/// It needs an initial value, which is what subscribers see until the first
/// `next()`. After termination, new subscribers receive the last value and
/// then the terminal notification.
///
/// # Examples
///
///```
/// use rxkit::{subjects::BehaviorSubject, Observer, Subscribeable};
///
/// let mut subject = BehaviorSubject::new(0);
///
/// subject.subscribe_next(|v| println!("first: {}", v)); // "first: 0"
///
/// subject.next(5); // "first: 5"
///
/// subject.subscribe_next(|v| println!("second: {}", v)); // "second: 5"
/// assert_eq!(subject.value(), 5);
///```
#[derive(Clone)]
pub struct BehaviorSubject<T>(SubjectCore<T, Latest<T>>);

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    /// Creates a `BehaviorSubject` whose current value is `value`.
    pub fn new(value: T) -> Self {
        BehaviorSubject(SubjectCore::new(Latest::new(value)))
    }

    /// Returns a clone of the current value.
    pub fn value(&self) -> T {
        self.0.latest()
    }
}

impl_subject!(BehaviorSubject);
