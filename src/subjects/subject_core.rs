use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    sync::{Arc, Weak},
};

use parking_lot::{Mutex, ReentrantMutex};

use crate::{
    errors::ProducerError,
    event::Event,
    observer::Observer,
    subscription::{Disposable, Subscriber},
};

/// Values a subject keeps for subscribers that arrive late.
pub(crate) trait ReplayBuffer<T> {
    fn record(&mut self, v: &T);

    /// Values to replay, oldest first.
    fn snapshot(&self) -> Vec<T>;
}

/// Keeps nothing.
pub(crate) struct NoReplay;

impl<T> ReplayBuffer<T> for NoReplay {
    fn record(&mut self, _: &T) {}

    fn snapshot(&self) -> Vec<T> {
        Vec::new()
    }
}

/// The most recent value, seeded at construction.
pub(crate) struct Latest<T>(T);

impl<T> Latest<T> {
    pub(crate) fn new(seed: T) -> Self {
        Latest(seed)
    }
}

impl<T: Clone> ReplayBuffer<T> for Latest<T> {
    fn record(&mut self, v: &T) {
        self.0 = v.clone();
    }

    fn snapshot(&self) -> Vec<T> {
        vec![self.0.clone()]
    }
}

/// The last `capacity` values. `None` keeps everything.
pub(crate) struct Window<T> {
    capacity: Option<usize>,
    values: VecDeque<T>,
}

impl<T> Window<T> {
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        // Grows on demand, the bound is only enforced by `record`.
        let initial = capacity.map_or(16, |size| size.min(16));
        Window {
            capacity,
            values: VecDeque::with_capacity(initial),
        }
    }
}

impl<T: Clone> ReplayBuffer<T> for Window<T> {
    fn record(&mut self, v: &T) {
        match self.capacity {
            Some(0) => (),
            Some(size) => {
                // Check if buffer is full.
                if self.values.len() == size {
                    self.values.pop_front();
                }
                self.values.push_back(v.clone());
            }
            None => self.values.push_back(v.clone()),
        }
    }

    fn snapshot(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }
}

#[derive(Clone)]
enum Termination {
    Completed,
    Error(ProducerError),
}

impl Termination {
    fn to_event<T>(&self) -> Event<T> {
        match self {
            Termination::Completed => Event::Completed,
            Termination::Error(e) => Event::Error(e.clone()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Termination::Completed => "completed",
            Termination::Error(_) => "error",
        }
    }
}

type SharedObserver<T> = Arc<Mutex<Subscriber<T>>>;

struct State<T, B> {
    observers: Vec<(u64, SharedObserver<T>)>,
    buffer: B,
    termination: Option<Termination>,
    next_key: u64,
}

/// Per-subject delivery state, owned by the thread currently emitting.
struct Emission<T> {
    draining: Cell<bool>,
    // Events emitted from inside a callback, delivered once the current
    // event has reached every observer.
    pending: RefCell<VecDeque<Event<T>>>,
}

/// Marks the current thread as the one delivering. Reset on drop, including
/// unwinding out of a callback.
struct Draining<'a, T>(&'a Emission<T>);

impl<'a, T> Draining<'a, T> {
    fn start(emission: &'a Emission<T>) -> Self {
        emission.draining.set(true);
        Draining(emission)
    }
}

impl<T> Drop for Draining<'_, T> {
    fn drop(&mut self) {
        self.0.draining.set(false);
        self.0.pending.borrow_mut().clear();
    }
}

struct Shared<T, B> {
    state: Mutex<State<T, B>>,
    // Serializes emissions across threads. Re-entered by the emitting thread
    // when a callback emits into the same subject.
    emission: ReentrantMutex<Emission<T>>,
}

/// Registry, lifecycle and replay buffer shared by every subject variant.
///
/// Emissions are delivered outside of the state lock, so observer callbacks
/// may subscribe, dispose and emit on the same subject. An emission made from
/// inside a callback is queued and delivered after the current one has
/// reached every observer.
pub(crate) struct SubjectCore<T, B>(Arc<Shared<T, B>>);

impl<T, B> Clone for SubjectCore<T, B> {
    fn clone(&self) -> Self {
        SubjectCore(Arc::clone(&self.0))
    }
}

impl<T, B> SubjectCore<T, B>
where
    T: Clone + Send + 'static,
    B: ReplayBuffer<T> + Send + 'static,
{
    pub(crate) fn new(buffer: B) -> Self {
        SubjectCore(Arc::new(Shared {
            state: Mutex::new(State {
                observers: Vec::with_capacity(16),
                buffer,
                termination: None,
                next_key: 0,
            }),
            emission: ReentrantMutex::new(Emission {
                draining: Cell::new(false),
                pending: RefCell::new(VecDeque::new()),
            }),
        }))
    }

    pub(crate) fn subscribe(&self, s: Subscriber<T>) -> Disposable {
        // Taken so that no emission can overtake the replay.
        let emission = self.0.emission.lock();
        if emission.draining.get() {
            // Subscribing from a callback of this subject.
            return self.attach(s);
        }

        let _draining = Draining::start(&emission);
        let subscription = self.attach(s);
        self.drain(&emission);
        subscription
    }

    fn attach(&self, s: Subscriber<T>) -> Disposable {
        let lifecycle = s.lifecycle();
        let observer = Arc::new(Mutex::new(s));

        let (replay, termination, key, count) = {
            let mut state = self.0.state.lock();
            let key = state.next_key;
            let termination = state.termination.clone();
            if termination.is_none() {
                state.next_key += 1;
                state.observers.push((key, Arc::clone(&observer)));
            }
            (
                state.buffer.snapshot(),
                termination,
                key,
                state.observers.len(),
            )
        };

        for v in replay {
            observer.lock().next(v);
        }

        if let Some(t) = termination {
            // Terminated subject: replay then terminal event, nothing to cancel.
            observer.lock().on(t.to_event());
            return Disposable::empty();
        }

        tracing::trace!(key, observers = count, "observer registered on subject");

        let registry: Weak<Shared<T, B>> = Arc::downgrade(&self.0);
        let closer = Arc::clone(&lifecycle);
        let subscription = Disposable::create(move || {
            closer.close();
            if let Some(shared) = registry.upgrade() {
                shared.state.lock().observers.retain(|(k, _)| *k != key);
                tracing::trace!(key, "observer removed from subject");
            }
        });
        lifecycle.attach(Disposable::empty(), &subscription);
        subscription
    }

    pub(crate) fn on(&self, event: Event<T>) {
        let emission = self.0.emission.lock();
        if emission.draining.get() {
            tracing::trace!("emission from inside a callback queued");
            emission.pending.borrow_mut().push_back(event);
            return;
        }

        let _draining = Draining::start(&emission);
        self.deliver(event);
        self.drain(&emission);
    }

    fn drain(&self, emission: &Emission<T>) {
        loop {
            let event = emission.pending.borrow_mut().pop_front();
            match event {
                Some(event) => self.deliver(event),
                None => break,
            }
        }
    }

    fn deliver(&self, event: Event<T>) {
        match event {
            Event::Next(v) => self.next(v),
            Event::Error(e) => self.terminate(Termination::Error(e)),
            Event::Completed => self.terminate(Termination::Completed),
        }
    }

    fn next(&self, v: T) {
        let observers: Vec<SharedObserver<T>> = {
            let mut state = self.0.state.lock();
            if state.termination.is_some() {
                return;
            }
            state.buffer.record(&v);
            state.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
        };

        for o in observers {
            o.lock().next(v.clone());
        }
    }

    fn terminate(&self, termination: Termination) {
        let observers = {
            let mut state = self.0.state.lock();
            if state.termination.is_some() {
                return;
            }
            state.termination = Some(termination.clone());
            std::mem::take(&mut state.observers)
        };

        tracing::debug!(
            kind = termination.name(),
            observers = observers.len(),
            "subject terminated"
        );

        for (_, o) in observers {
            o.lock().on(termination.to_event());
        }
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.0.state.lock().observers.len()
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.0.state.lock().termination.is_some()
    }
}

impl<T: Clone> SubjectCore<T, Latest<T>> {
    /// Current value of a behavior subject.
    pub(crate) fn latest(&self) -> T {
        self.0.state.lock().buffer.0.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounded_window_keeps_last_values() {
        let mut b = Window::new(Some(2));
        for v in 1..=3 {
            b.record(&v);
        }
        assert_eq!(b.snapshot(), vec![2, 3]);
    }

    #[test]
    fn zero_window_keeps_nothing() {
        let mut b = Window::new(Some(0));
        b.record(&1);
        assert!(b.snapshot().is_empty());
    }

    #[test]
    fn unbounded_window_keeps_everything() {
        let mut b = Window::new(None);
        for v in 0..100 {
            b.record(&v);
        }
        assert_eq!(b.snapshot().len(), 100);
    }

    #[test]
    fn huge_bound_does_not_preallocate() {
        let mut b = Window::new(Some(usize::MAX));
        for v in 0..3 {
            b.record(&v);
        }
        assert_eq!(b.snapshot(), vec![0, 1, 2]);
        assert!(b.values.capacity() < 1024);
    }

    #[test]
    fn latest_is_overwritten() {
        let mut b = Latest::new(0);
        assert_eq!(b.snapshot(), vec![0]);
        b.record(&5);
        assert_eq!(b.snapshot(), vec![5]);
    }

    #[test]
    fn dispose_after_subject_dropped_is_harmless() {
        let core = SubjectCore::<i32, _>::new(NoReplay);
        let d = core.subscribe(Subscriber::empty());
        assert_eq!(core.observer_count(), 1);

        drop(core);
        d.dispose();

        assert!(d.is_disposed());
    }

    #[test]
    fn panicking_callback_does_not_wedge_the_subject() {
        let core = SubjectCore::<i32, _>::new(NoReplay);
        let d = core.subscribe(Subscriber::on_next(|v| {
            if v == 1 {
                panic!("observer failed");
            }
        }));

        let emitter = core.clone();
        let result = std::thread::spawn(move || emitter.on(Event::Next(1))).join();
        assert!(result.is_err());

        // The observer lock was released on unwind and emissions go on.
        d.dispose();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_c = Arc::clone(&seen);
        core.subscribe(Subscriber::on_next(move |v| seen_c.lock().push(v)));
        core.on(Event::Next(2));

        assert_eq!(*seen.lock(), vec![2]);
    }
}
