//! Provides structures and traits related to subscription management.
//!
//! This module includes [`Subscriber`] for handling observed values, errors,
//! completions and disposal, [`Disposable`] for cancelling a subscription,
//! and [`DisposeBag`] for releasing many subscriptions together.
mod disposable;
mod dispose_bag;
mod subscribeable;
mod subscriber;

pub use disposable::*;
pub use dispose_bag::*;
pub use subscribeable::*;
pub use subscriber::Subscriber;

pub(crate) use subscriber::Lifecycle;
