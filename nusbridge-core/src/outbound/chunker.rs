//! Frame chunker
//!
//! Writes one logical message as a run of notifications, in order, each at
//! most `max_frame` bytes. Stateless: every call stands alone.

use nusbridge_hal::Notifier;
use nusbridge_protocol::Frames;

/// Failure while sending one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError<E> {
    /// Frame size of zero requested; nothing was written
    InvalidFrameSize,
    /// A notification write failed; later frames were not attempted
    Transport {
        /// Zero-based index of the frame that failed
        frame: usize,
        /// Bytes delivered by the frames before it
        delivered: usize,
        /// Error reported by the notifier
        error: E,
    },
}

impl<E> SendError<E> {
    /// Bytes that reached the peer before the failure
    pub fn delivered(&self) -> usize {
        match self {
            SendError::InvalidFrameSize => 0,
            SendError::Transport { delivered, .. } => *delivered,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for SendError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SendError::InvalidFrameSize => f.write_str("frame size must be non-zero"),
            SendError::Transport {
                frame,
                delivered,
                error,
            } => write!(
                f,
                "notification {} failed after {} bytes: {:?}",
                frame, delivered, error
            ),
        }
    }
}

/// Send `message` as ordered notifications of at most `max_frame` bytes
///
/// Returns the number of frames written. An empty message writes nothing
/// and succeeds. On the first failed write the remaining frames are
/// abandoned; frames already written are not recalled.
pub async fn send<N: Notifier>(
    notifier: &mut N,
    message: &[u8],
    max_frame: usize,
) -> Result<usize, SendError<N::Error>> {
    let frames = Frames::new(message, max_frame).map_err(|_| SendError::InvalidFrameSize)?;

    let mut delivered = 0;
    let mut written = 0;
    for (index, frame) in frames.enumerate() {
        if let Err(error) = notifier.notify(frame).await {
            return Err(SendError::Transport {
                frame: index,
                delivered,
                error,
            });
        }
        delivered += frame.len();
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockNotifier;
    use embassy_futures::block_on;
    use nusbridge_hal::LinkError;
    use nusbridge_protocol::{frame_count, DEFAULT_FRAME_SIZE};
    use proptest::prelude::*;

    #[test]
    fn test_status_line_is_one_frame() {
        let mut notifier = MockNotifier::default();
        let written = block_on(send(&mut notifier, b"VBat: 3000\n", DEFAULT_FRAME_SIZE)).unwrap();
        assert_eq!(written, 1);
        assert_eq!(notifier.frames.len(), 1);
        assert_eq!(notifier.frames[0].len(), 11);
    }

    #[test]
    fn test_45_bytes_are_20_20_5() {
        let mut notifier = MockNotifier::default();
        let message: std::vec::Vec<u8> = (0..45).collect();
        let written = block_on(send(&mut notifier, &message, 20)).unwrap();

        assert_eq!(written, 3);
        let lengths: std::vec::Vec<usize> = notifier.frames.iter().map(|f| f.len()).collect();
        assert_eq!(lengths, [20, 20, 5]);
        assert_eq!(notifier.joined(), message);
    }

    #[test]
    fn test_empty_message_succeeds_without_writes() {
        let mut notifier = MockNotifier::failing_at(0);
        assert_eq!(block_on(send(&mut notifier, &[], 20)), Ok(0));
        assert_eq!(notifier.attempts, 0);
    }

    #[test]
    fn test_failure_aborts_remaining_frames() {
        let mut notifier = MockNotifier::failing_at(1);
        let message = [7u8; 50];
        let result = block_on(send(&mut notifier, &message, 20));

        assert_eq!(
            result,
            Err(SendError::Transport {
                frame: 1,
                delivered: 20,
                error: LinkError::NotConnected,
            })
        );
        assert_eq!(notifier.attempts, 2);
        assert_eq!(notifier.frames.len(), 1);
    }

    #[test]
    fn test_zero_frame_size_rejected() {
        let mut notifier = MockNotifier::default();
        let result = block_on(send(&mut notifier, b"abc", 0));
        assert_eq!(result, Err(SendError::InvalidFrameSize));
        assert_eq!(notifier.attempts, 0);
    }

    proptest! {
        #[test]
        fn prop_concatenation_reproduces_message(
            message in proptest::collection::vec(any::<u8>(), 0..300),
            max_frame in 1usize..48,
        ) {
            let mut notifier = MockNotifier::default();
            let written = block_on(send(&mut notifier, &message, max_frame)).unwrap();
            prop_assert_eq!(written, frame_count(message.len(), max_frame));
            prop_assert!(notifier.frames.iter().all(|f| f.len() <= max_frame));
            prop_assert_eq!(notifier.joined(), message);
        }

        #[test]
        fn prop_failure_at_k_stops_at_k(
            len in 1usize..200,
            max_frame in 1usize..32,
            k in 0usize..16,
        ) {
            let message = std::vec![0xA5u8; len];
            let total = frame_count(len, max_frame);
            let mut notifier = MockNotifier::failing_at(k);
            let result = block_on(send(&mut notifier, &message, max_frame));

            if k < total {
                prop_assert_eq!(result.unwrap_err().delivered(), k * max_frame);
                prop_assert_eq!(notifier.attempts, k + 1);
                prop_assert_eq!(notifier.frames.len(), k);
            } else {
                prop_assert_eq!(result, Ok(total));
            }
        }
    }
}
