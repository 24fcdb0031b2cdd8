use crate::subscription::Subscribeable;

use super::Observable;

impl<T: 'static> Observable<T> {
    /// Creates an observable that calls `factory` on each subscription and
    /// subscribes to the observable it returns.
    ///
    /// Nothing is built until someone subscribes, and every subscriber gets
    /// a freshly built source.
    ///
    /// ```
    /// use std::time::Instant;
    ///
    /// use rxkit::{Observable, Subscribeable};
    ///
    /// let now = Observable::deferred(|| Observable::just(Instant::now()));
    ///
    /// now.subscribe_next(|t| println!("first subscription at {:?}", t));
    /// now.subscribe_next(|t| println!("second subscription at {:?}", t));
    /// ```
    pub fn deferred<F>(factory: F) -> Self
    where
        F: Fn() -> Observable<T> + Send + Sync + 'static,
    {
        Observable::create(move |o| {
            tracing::trace!("building deferred observable");
            factory().subscribe(o)
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use parking_lot::Mutex;

    use crate::{subscription::Subscribeable, Observable};

    #[test]
    fn factory_runs_once_per_subscription() {
        let built = Arc::new(AtomicUsize::new(0));
        let built_c = Arc::clone(&built);

        let observable = Observable::deferred(move || {
            let n = built_c.fetch_add(1, Ordering::SeqCst) as i64;
            Observable::range(n * 10, 2)
        });
        assert_eq!(built.load(Ordering::SeqCst), 0);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_c = Arc::clone(&seen);
        observable.subscribe_next(move |v| seen_c.lock().push(v));
        let seen_c = Arc::clone(&seen);
        observable.subscribe_next(move |v| seen_c.lock().push(v));

        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.lock(), vec![0, 1, 10, 11]);
    }

    #[test]
    fn disposing_reaches_the_built_observable() {
        let released = Arc::new(AtomicUsize::new(0));
        let released_c = Arc::clone(&released);

        let observable = Observable::<i32>::deferred(move || {
            let released_c = Arc::clone(&released_c);
            Observable::create(move |_| {
                let released_c = Arc::clone(&released_c);
                crate::Disposable::create(move || {
                    released_c.fetch_add(1, Ordering::SeqCst);
                })
            })
        });

        let d = observable.subscribe_next(|_| {});
        assert_eq!(released.load(Ordering::SeqCst), 0);
        d.dispose();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }
}
