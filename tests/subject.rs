mod custom_error;
mod register_events;

use std::sync::{Arc, Mutex};

use custom_error::CustomError;
use register_events::register_events_subscriber;
use rxkit::{of, Observable, Observer, ProducerError, PublishSubject, Subscribeable, Subscriber};

#[test]
fn subject_emit_then_complete() {
    let (mut make_subscriber, nexts, completes, errors) = register_events_subscriber();

    let mut subject = PublishSubject::new();

    // Emitting a value, but there are currently no registered subscribers.
    subject.next(1);

    assert_eq!(subject.observer_count(), 0);
    assert_eq!(nexts.lock().unwrap().len(), 0);

    // Register subscriber.
    subject.subscribe(make_subscriber.pop().unwrap()()); // 1st

    // Emissions are not stored so nothing is emitted after subscribing.
    assert_eq!(subject.observer_count(), 1);
    assert_eq!(nexts.lock().unwrap().len(), 0);

    subject.next(2);
    subject.next(3);

    assert_eq!(*nexts.lock().unwrap(), vec![2, 3]);

    // Register 2 additional subscribers.
    subject.subscribe(make_subscriber.pop().unwrap()()); // 2nd
    subject.subscribe(make_subscriber.pop().unwrap()()); // 3rd

    assert_eq!(subject.observer_count(), 3);
    assert_eq!(nexts.lock().unwrap().len(), 2);

    // Every registered subscriber gets the value, in subscription order.
    subject.next(4);

    assert_eq!(*nexts.lock().unwrap(), vec![2, 3, 4, 4, 4]);

    subject.complete();

    assert_eq!(subject.observer_count(), 0);
    assert!(subject.is_terminated());
    assert_eq!(completes.lock().unwrap().len(), 3);
    assert_eq!(errors.lock().unwrap().len(), 0);

    // Emissions after completion are ignored.
    subject.next(5);
    subject.error(ProducerError::new(CustomError));

    assert_eq!(nexts.lock().unwrap().len(), 5);
    assert_eq!(completes.lock().unwrap().len(), 3);
    assert_eq!(errors.lock().unwrap().len(), 0);

    // A late subscriber only receives the completion.
    subject.subscribe(make_subscriber.pop().unwrap()());

    assert_eq!(subject.observer_count(), 0);
    assert_eq!(nexts.lock().unwrap().len(), 5);
    assert_eq!(completes.lock().unwrap().len(), 4);
}

#[test]
fn subject_emit_then_error() {
    let (mut make_subscriber, nexts, completes, errors) = register_events_subscriber();

    let mut subject = PublishSubject::new();

    subject.subscribe(make_subscriber.pop().unwrap()());
    subject.subscribe(make_subscriber.pop().unwrap()());
    subject.next(1);
    subject.error(ProducerError::new(CustomError));
    subject.complete();

    assert_eq!(nexts.lock().unwrap().len(), 2);
    assert_eq!(completes.lock().unwrap().len(), 0);
    assert_eq!(errors.lock().unwrap().len(), 2);

    subject.subscribe(make_subscriber.pop().unwrap()());

    assert_eq!(errors.lock().unwrap().len(), 3);
    assert_eq!(errors.lock().unwrap()[2], "custom error occurred");
    assert_eq!(completes.lock().unwrap().len(), 0);
}

#[test]
fn subject_dispose_removes_only_that_subscriber() {
    let (mut make_subscriber, nexts, _, _) = register_events_subscriber();

    let mut subject = PublishSubject::new();

    let first = subject.subscribe(make_subscriber.pop().unwrap()());
    subject.subscribe(make_subscriber.pop().unwrap()());

    subject.next(1);
    first.dispose();
    subject.next(2);

    assert_eq!(subject.observer_count(), 1);
    assert_eq!(*nexts.lock().unwrap(), vec![1, 1, 2]);
}

#[test]
fn subject_relays_an_observable() {
    let (mut make_subscriber, nexts, completes, _) = register_events_subscriber();

    let subject = PublishSubject::new();
    subject.subscribe(make_subscriber.pop().unwrap()());

    of!(1, 2, 3).subscribe(Subscriber::from(subject.clone()));

    assert_eq!(*nexts.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(completes.lock().unwrap().len(), 1);
    assert!(subject.is_terminated());
}

#[test]
fn subject_as_observable() {
    let (mut make_subscriber, nexts, _, _) = register_events_subscriber();

    let mut subject = PublishSubject::new();
    let observable: Observable<i32> = subject.as_observable();

    let subscription = observable.subscribe(make_subscriber.pop().unwrap()());
    subject.next(1);
    assert!(subject.has_observers());

    subscription.dispose();
    subject.next(2);

    assert!(!subject.has_observers());
    assert_eq!(*nexts.lock().unwrap(), vec![1]);
}

#[test]
fn subject_callbacks_may_subscribe() {
    let mut subject = PublishSubject::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let inner_subject = subject.clone();
    let seen_c = Arc::clone(&seen);
    subject.subscribe_next(move |v: i32| {
        let seen_c = Arc::clone(&seen_c);
        if v == 1 {
            inner_subject.subscribe_next(move |v| seen_c.lock().unwrap().push(v));
        }
    });

    subject.next(1);
    subject.next(2);

    assert_eq!(subject.observer_count(), 2);
    assert_eq!(*seen.lock().unwrap(), vec![2]);
}

#[test]
fn subject_callback_may_emit_into_the_same_subject() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (done_tx, done_rx) = std::sync::mpsc::channel();

    let seen_c = Arc::clone(&seen);
    std::thread::spawn(move || {
        let mut subject = PublishSubject::new();

        let mut inner = subject.clone();
        let first = Arc::clone(&seen_c);
        subject.subscribe_next(move |v: i32| {
            first.lock().unwrap().push(format!("first {}", v));
            if v == 1 {
                inner.next(2);
            }
        });
        let second = Arc::clone(&seen_c);
        subject.subscribe_next(move |v: i32| second.lock().unwrap().push(format!("second {}", v)));

        subject.next(1);
        let _ = done_tx.send(());
    });

    assert!(
        done_rx.recv_timeout(std::time::Duration::from_secs(3)).is_ok(),
        "emitting from a callback blocked"
    );
    // The nested value waits until 1 has reached every observer.
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["first 1", "second 1", "first 2", "second 2"]
    );
}

#[test]
fn subject_callback_may_complete_the_same_subject() {
    let (mut make_subscriber, nexts, completes, _) = register_events_subscriber();

    let mut subject = PublishSubject::new();
    let mut inner = subject.clone();
    subject.subscribe_next(move |v: i32| {
        if v == 2 {
            inner.complete();
        }
    });
    subject.subscribe(make_subscriber.pop().unwrap()());

    subject.next(1);
    subject.next(2);
    subject.next(3);

    assert_eq!(*nexts.lock().unwrap(), vec![1, 2]);
    assert_eq!(completes.lock().unwrap().len(), 1);
    assert!(subject.is_terminated());
}
