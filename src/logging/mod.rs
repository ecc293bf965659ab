//! Logging setup for binaries and actions built on this crate.
//!
//! Library code only emits [`tracing`] events; nothing is printed unless the
//! host program installs a subscriber, typically via [`init_subscriber`].

mod subscriber;

pub use subscriber::init_subscriber;
