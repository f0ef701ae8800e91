#![forbid(unsafe_code)]

//! Reactive notification primitives.
//!
//! - [`channel::EventChannel`]: ordered multi-subscriber broadcast.
//! - [`batch::BatchScope`]: defers deliveries until the outermost scope exits.

pub mod batch;
pub mod channel;
