//! Ingress ring buffer
//!
//! Bytes written by the central arrive in the radio event context and are
//! consumed by the drain loop. The buffer has a fixed power-of-two capacity
//! and a drop-newest overflow policy: a full buffer rejects the incoming
//! byte, counts it, and leaves the buffered bytes untouched.

pub mod buffer;
pub mod shared;

pub use buffer::RingBuffer;
pub use shared::SharedRing;

/// Default ingress capacity in bytes
pub const INGRESS_CAPACITY: usize = 128;
