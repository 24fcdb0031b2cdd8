use std::sync::{Arc, Mutex};

use rxkit::Subscriber;

/// Records every `next()` value plus one entry per `error()` and
/// `complete()` call, shared by every subscriber the factories build.
pub fn register_events_subscriber() -> (
    Vec<impl FnOnce() -> Subscriber<i32>>,
    Arc<Mutex<Vec<i32>>>,
    Arc<Mutex<Vec<i32>>>,
    Arc<Mutex<Vec<String>>>,
) {
    let nexts = Arc::new(Mutex::new(Vec::with_capacity(8)));
    let nexts_c = Arc::clone(&nexts);

    let completes = Arc::new(Mutex::new(Vec::with_capacity(8)));
    let completes_c = Arc::clone(&completes);

    let errors = Arc::new(Mutex::new(Vec::with_capacity(8)));
    let errors_c = Arc::clone(&errors);

    let make_subscriber = vec![
        move || {
            Subscriber::new(
                move |n| {
                    // Track next() calls.
                    nexts_c.lock().unwrap().push(n);
                },
                move |e| {
                    // Track error() calls by message.
                    errors_c.lock().unwrap().push(e.to_string());
                },
                move || {
                    // Track complete() calls.
                    completes_c.lock().unwrap().push(1);
                },
            )
        };
        10
    ];
    (make_subscriber, nexts, completes, errors)
}
