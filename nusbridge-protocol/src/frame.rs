//! Outbound frame slicing
//!
//! A logical message of length `L` becomes `ceil(L / M)` frames for a frame
//! size `M`. Every frame but the last is exactly `M` bytes; concatenating
//! the frames in order reproduces the message.

use core::slice::Chunks;

/// Frame size for the minimum ATT MTU (23) minus the 3-byte notification header
pub const DEFAULT_FRAME_SIZE: usize = 20;

/// Largest notification payload with the data-length extension (MTU 247)
pub const MAX_NOTIFY_PAYLOAD: usize = 244;

/// ATT notification header (opcode + attribute handle)
pub const ATT_NOTIFY_HEADER: usize = 3;

/// L2CAP basic header (length + channel id)
pub const L2CAP_HEADER: usize = 4;

/// L2CAP MTU the controller needs to carry a notification of `max_frame` bytes
pub const fn l2cap_mtu_for_frame(max_frame: usize) -> usize {
    max_frame + ATT_NOTIFY_HEADER + L2CAP_HEADER
}

/// Errors that can occur when slicing a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame size is zero
    ZeroFrameSize,
}

/// Iterator over the frames of one outbound message
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    chunks: Chunks<'a, u8>,
}

impl<'a> Frames<'a> {
    /// Slice `message` into frames of at most `max_frame` bytes
    pub fn new(message: &'a [u8], max_frame: usize) -> Result<Self, FrameError> {
        if max_frame == 0 {
            return Err(FrameError::ZeroFrameSize);
        }
        Ok(Self {
            chunks: message.chunks(max_frame),
        })
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Number of frames a message of `len` bytes needs
///
/// Returns 0 for an empty message, or when `max_frame` is zero.
pub const fn frame_count(len: usize, max_frame: usize) -> usize {
    if max_frame == 0 {
        return 0;
    }
    len.div_ceil(max_frame)
}
