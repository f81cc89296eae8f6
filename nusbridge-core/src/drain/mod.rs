//! Ingress drain: ring buffer to local sink

pub mod runner;
pub mod sink;

pub use runner::{Console, DrainError, DrainLoop, DrainReport, Pacer};
pub use sink::{BufferedSink, SINK_BUFFER_SIZE};

/// Default pause between drain iterations
pub const DRAIN_INTERVAL_MS: u64 = 1;
