//! Grantbridge Relay Library
//!
//! Bridges host-delivered runtime-permission results to an embedded
//! runtime in another process:
//! - `SQLite` single-slot storage for the latest result
//! - `ResultRelay` writer invoked once per completed permission flow
//! - `ResultWatcher` polling reader with a timestamp watermark

pub mod relay;
pub mod storage;
pub mod watch;

pub use relay::{RelayError, ResultRelay};
pub use watch::{ResultWatcher, WatchError};
