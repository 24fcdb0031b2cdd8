use crate::{
    errors::{ProducerError, RxError},
    observer::Observer,
    subscription::Disposable,
};

use super::Observable;

/// Creates an observable emitting each argument in order, then completing.
///
/// `of!(1, 2, 3)` emits three values; `of!(vec![1, 2, 3])` emits a single
/// value, the whole vector.
///
/// ```
/// use rxkit::{of, Subscribeable};
///
/// of!(1, 2, 3).subscribe_next(|v| println!("{}", v));
///
/// // print log:
/// // 1
/// // 2
/// // 3
/// ```
#[macro_export]
macro_rules! of {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::Observable::from_iter(::std::vec![ $( $item ),* ])
    };
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Creates an observable that emits `v` once and completes.
    pub fn just(v: T) -> Self {
        Observable::create(move |mut o| {
            o.next(v.clone());
            o.complete();
            Disposable::empty()
        })
    }
}

impl<T: 'static> Observable<T> {
    /// Creates an observable that emits every element of `iter`, in order,
    /// and completes.
    ///
    /// `iter` is cloned for each subscription, so every subscriber walks
    /// the whole sequence.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Observable::create(move |mut o| {
            for v in iter.clone() {
                o.next(v);
            }
            o.complete();
            Disposable::empty()
        })
    }

    /// Creates an observable that completes immediately without emitting.
    pub fn empty() -> Self {
        Observable::create(|mut o| {
            o.complete();
            Disposable::empty()
        })
    }

    /// Creates an observable that never emits anything, not even a terminal
    /// notification. Its subscriptions can still be disposed.
    pub fn never() -> Self {
        Observable::create(|_| Disposable::empty())
    }

    /// Creates an observable that emits only the error `e`.
    pub fn error(e: ProducerError) -> Self {
        Observable::create(move |mut o| {
            o.error(e.clone());
            Disposable::empty()
        })
    }
}

impl Observable<i64> {
    /// Creates an observable emitting `count` consecutive integers starting
    /// at `start`, then completing.
    ///
    /// If the last value would not fit in an `i64` nothing is emitted and
    /// subscribers get [`RxError::RangeOverflow`] instead.
    pub fn range(start: i64, count: usize) -> Self {
        Observable::create(move |mut o| {
            let last = match count.checked_sub(1) {
                None => Some(start),
                Some(n) => i64::try_from(n).ok().and_then(|n| start.checked_add(n)),
            };
            if last.is_none() {
                o.error(RxError::RangeOverflow { start, count }.into());
                return Disposable::empty();
            }

            for i in 0..count {
                o.next(start + i as i64);
            }
            o.complete();
            Disposable::empty()
        })
    }
}
