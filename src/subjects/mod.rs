//! The `subjects` module provides hot streams that are both an observable and
//! an observer.
//!
//! A subject keeps a list of registered observers and multicasts every value
//! pushed into it with `next()` to all of them, in subscription order.
//! Subscribers only see what is pushed after they subscribe, except for what
//! the variant replays:
//!
//! - [`PublishSubject`] replays nothing.
//! - [`BehaviorSubject`] replays its current value.
//! - [`ReplaySubject`] replays the last N values.
//!
//! After `error()` or `complete()` a subject is terminated for good: later
//! emissions are ignored and later subscribers get the replay followed by
//! the terminal event.
//!
//! Subject handles are shallow: cloning one clones only the pointer to the
//! shared state.
//!
//! Observer callbacks may emit into the subject that is calling them. Such a
//! value is queued and delivered once the current one has reached every
//! observer, so all observers still see a single order.

/// Implements the observer and observable sides of a subject handle that
/// wraps a `SubjectCore` in its first field.
macro_rules! impl_subject {
    ($name:ident) => {
        impl<T: Clone + Send + 'static> $name<T> {
            /// Returns the number of registered observers.
            pub fn observer_count(&self) -> usize {
                self.0.observer_count()
            }

            /// Returns `true` if at least one observer is registered.
            pub fn has_observers(&self) -> bool {
                self.observer_count() > 0
            }

            /// Returns `true` once `error()` or `complete()` has been called.
            pub fn is_terminated(&self) -> bool {
                self.0.is_terminated()
            }

            /// Returns a cold-looking `Observable` that subscribes to this
            /// subject.
            pub fn as_observable(&self) -> $crate::Observable<T> {
                let core = self.0.clone();
                $crate::Observable::create(move |s| core.subscribe(s))
            }
        }

        impl<T: Clone + Send + 'static> $crate::observer::Observer for $name<T> {
            type NextFnType = T;

            fn on(&mut self, event: $crate::event::Event<T>) {
                self.0.on(event);
            }
        }

        impl<T: Clone + Send + 'static> $crate::subscription::Subscribeable for $name<T> {
            type ObsType = T;

            fn subscribe(
                &self,
                s: $crate::subscription::Subscriber<T>,
            ) -> $crate::subscription::Disposable {
                self.0.subscribe(s)
            }
        }

        impl<T: Clone + Send + 'static> From<$name<T>> for $crate::subscription::Subscriber<T> {
            fn from(mut value: $name<T>) -> Self {
                $crate::subscription::Subscriber::from_event(move |e| {
                    $crate::observer::Observer::on(&mut value, e)
                })
            }
        }

        impl<T: Clone + Send + 'static> From<$name<T>> for $crate::Observable<T> {
            fn from(value: $name<T>) -> Self {
                value.as_observable()
            }
        }
    };
}

pub(crate) use impl_subject;

mod behavior_subject;
mod subject_core;
mod replay_subject;
mod subject;

pub use behavior_subject::*;
pub use replay_subject::*;
pub use subject::*;
