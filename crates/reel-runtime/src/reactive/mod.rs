#![forbid(unsafe_code)]

//! Reactive state primitives.

pub mod observable;

pub use observable::{Observable, Subscription};
