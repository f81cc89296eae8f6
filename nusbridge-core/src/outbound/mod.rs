//! Outbound path: queued messages to radio notifications

pub mod chunker;
pub mod queue;

pub use chunker::{send, SendError};
pub use queue::{
    write_next, Message, OutboundQueue, QueueError, OUTBOUND_DEPTH, OUTBOUND_MESSAGE_SIZE,
};
