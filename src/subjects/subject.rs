use super::{
    impl_subject,
    subject_core::{NoReplay, SubjectCore},
};

/// A hot stream that multicasts values to every observer registered at the
/// moment of emission. Nothing is replayed to late subscribers.
///
/// If the subject terminates, later subscribers receive only the terminal
/// notification.
///
/// # Examples
///
///```
/// use rxkit::{subjects::PublishSubject, Observer, Subscribeable};
///
/// let mut subject = PublishSubject::new();
///
/// subject.next(100); // No observers yet, nobody receives 100.
///
/// let subscription = subject.subscribe_next(|v: i32| println!("first: {}", v));
/// subject.next(101); // "first: 101"
///
/// subject.subscribe_next(|v| println!("second: {}", v));
/// subject.next(102); // "first: 102", "second: 102"
///
/// subscription.dispose();
/// subject.next(103); // "second: 103"
///
/// subject.complete();
/// subject.next(104); // Called post-completion, does not emit.
///```
///
/// A subject can also be fed by an observable:
///
///```
/// use rxkit::{of, subjects::PublishSubject, Subscribeable, Subscriber};
///
/// let subject = PublishSubject::new();
/// subject.subscribe_next(|v: i32| println!("relayed {}", v));
///
/// of!(1, 2, 3).subscribe(Subscriber::from(subject.clone()));
/// assert!(subject.is_terminated());
///```
#[derive(Clone)]
pub struct PublishSubject<T>(SubjectCore<T, NoReplay>);

impl<T: Clone + Send + 'static> PublishSubject<T> {
    pub fn new() -> Self {
        PublishSubject(SubjectCore::new(NoReplay))
    }
}

impl<T: Clone + Send + 'static> Default for PublishSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl_subject!(PublishSubject);
