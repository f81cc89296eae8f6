//! Single-writer outbound queue
//!
//! Telemetry and console lines are produced by independent tasks. Each one
//! submits whole messages here; exactly one writer drains the queue and
//! sends each message through the chunker before taking the next, so frames
//! of different messages never interleave on the link.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use nusbridge_hal::Notifier;

use super::chunker::{self, SendError};

/// Default number of queued messages
pub const OUTBOUND_DEPTH: usize = 8;

/// Default maximum message length in bytes
pub const OUTBOUND_MESSAGE_SIZE: usize = 64;

/// One queued message
pub type Message<const MSG: usize> = Vec<u8, MSG>;

/// Submission failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Queue is at depth; the message was not queued
    Full,
    /// Message is longer than a queue slot
    TooLong,
}

impl core::fmt::Display for QueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QueueError::Full => f.write_str("outbound queue full"),
            QueueError::TooLong => f.write_str("message exceeds queue slot size"),
        }
    }
}

/// Bounded multi-producer, single-consumer message queue
pub struct OutboundQueue<
    M: RawMutex,
    const DEPTH: usize = OUTBOUND_DEPTH,
    const MSG: usize = OUTBOUND_MESSAGE_SIZE,
> {
    channel: Channel<M, Message<MSG>, DEPTH>,
}

impl<M: RawMutex, const DEPTH: usize, const MSG: usize> OutboundQueue<M, DEPTH, MSG> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue a message without waiting
    pub fn try_submit(&self, message: &[u8]) -> Result<(), QueueError> {
        let message = Vec::from_slice(message).map_err(|_| QueueError::TooLong)?;
        self.channel.try_send(message).map_err(|_| QueueError::Full)
    }

    /// Queue a message, waiting for a free slot
    pub async fn submit(&self, message: &[u8]) -> Result<(), QueueError> {
        let message = Vec::from_slice(message).map_err(|_| QueueError::TooLong)?;
        self.channel.send(message).await;
        Ok(())
    }

    /// Writer side: wait for the next message
    pub async fn receive(&self) -> Message<MSG> {
        self.channel.receive().await
    }

    /// Writer side: take the next message if one is queued
    pub fn try_receive(&self) -> Option<Message<MSG>> {
        self.channel.try_receive().ok()
    }

    /// Drop every queued message, returning how many were discarded
    pub fn clear(&self) -> usize {
        let mut discarded = 0;
        while self.channel.try_receive().is_ok() {
            discarded += 1;
        }
        discarded
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// `true` when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl<M: RawMutex, const DEPTH: usize, const MSG: usize> Default for OutboundQueue<M, DEPTH, MSG> {
    fn default() -> Self {
        Self::new()
    }
}

/// Take the next message and send it whole
///
/// Waits for a message. Returns the number of frames written; on failure
/// the rest of that message is abandoned and the queue moves on.
pub async fn write_next<M, N, const DEPTH: usize, const MSG: usize>(
    queue: &OutboundQueue<M, DEPTH, MSG>,
    notifier: &mut N,
    max_frame: usize,
) -> Result<usize, SendError<N::Error>>
where
    M: RawMutex,
    N: Notifier,
{
    let message = queue.receive().await;
    chunker::send(notifier, &message, max_frame).await
}
