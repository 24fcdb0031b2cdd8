//! A small reactive extensions core.
//!
//! An [`Observable`] describes how to produce a stream of values; nothing
//! runs until it is subscribed, and every subscription runs the producer
//! anew. Each subscription returns a [`Disposable`] that cancels it.
//! Subjects ([`PublishSubject`], [`BehaviorSubject`], [`ReplaySubject`]) are
//! hot streams that are observers and observables at the same time.
//!
//! ```
//! use rxkit::{of, subjects::BehaviorSubject, DisposeBag, Observer, Subscribeable};
//!
//! let bag = DisposeBag::new();
//!
//! of!(1, 2, 3)
//!     .subscribe_next(|v| println!("{}", v))
//!     .disposed_by(&bag);
//!
//! let mut temperature = BehaviorSubject::new(20);
//! temperature
//!     .subscribe_next(|t| println!("temperature is {}", t))
//!     .disposed_by(&bag);
//! temperature.next(21);
//! ```

pub mod config;
mod errors;
pub mod event;
pub mod observable;
pub mod observer;
pub mod subjects;
pub mod subscription;

pub use config::UnhandledErrorPolicy;
pub use errors::*;
pub use event::Event;
pub use observable::Observable;
pub use observer::Observer;
pub use subjects::{BehaviorSubject, BufSize, PublishSubject, ReplaySubject};
pub use subscription::{DisposeBag, DisposeLogic, Disposable, Subscribeable, Subscriber};
