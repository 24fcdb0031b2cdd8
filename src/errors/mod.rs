//! Error types delivered through `error()` events.
mod rx_errors;

pub use rx_errors::*;
