//! Telemetry and console lines through the outbound queue to notifications

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use nusbridge_core::drain::Pacer;
use nusbridge_core::{
    send, write_next, Cancel, LineEditor, OutboundQueue, SendError, TelemetryGate,
    TelemetryPublisher,
};
use nusbridge_hal::{AnalogSource, LinkError, Notifier};
use nusbridge_protocol::DEFAULT_FRAME_SIZE;

/// Peer link that can be taken down between writes
#[derive(Default)]
struct Link {
    frames: Vec<Vec<u8>>,
    down_after: Option<usize>,
}

impl Notifier for Link {
    type Error = LinkError;

    async fn notify(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        if frame.len() > DEFAULT_FRAME_SIZE {
            return Err(LinkError::FrameTooLarge);
        }
        if self.down_after.is_some_and(|n| self.frames.len() >= n) {
            return Err(LinkError::NotConnected);
        }
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

struct Divider(u16);

impl AnalogSource for Divider {
    type Error = ();

    async fn sample(&mut self) -> Result<u16, Self::Error> {
        Ok(self.0)
    }
}

struct Immediate;

impl Pacer for Immediate {
    async fn pause(&mut self) {}
}

#[test]
fn test_status_line_single_notification() {
    let mut link = Link::default();
    let frames = block_on(send(&mut link, b"VBat: 3000\n", DEFAULT_FRAME_SIZE)).unwrap();
    assert_eq!(frames, 1);
    assert_eq!(link.frames, [b"VBat: 3000\n".to_vec()]);
}

#[test]
fn test_45_byte_message_split() {
    let message: Vec<u8> = (b'a'..=b'z').chain(b'A'..=b'S').collect();
    assert_eq!(message.len(), 45);

    let mut link = Link::default();
    assert_eq!(block_on(send(&mut link, &message, 20)), Ok(3));
    assert_eq!(link.frames[0], message[..20]);
    assert_eq!(link.frames[1], message[20..40]);
    assert_eq!(link.frames[2], message[40..]);
}

#[test]
fn test_partial_delivery_on_disconnect() {
    let mut link = Link {
        down_after: Some(1),
        ..Default::default()
    };
    let result = block_on(send(&mut link, &[0u8; 45], 20));
    assert_eq!(
        result,
        Err(SendError::Transport {
            frame: 1,
            delivered: 20,
            error: LinkError::NotConnected,
        })
    );
    assert_eq!(link.frames.len(), 1);
}

#[test]
fn test_telemetry_and_console_do_not_interleave() {
    let queue = OutboundQueue::<NoopRawMutex, 8, 64>::new();
    let gate = TelemetryGate::default();
    let cancel = Cancel::new();
    let mut publisher = TelemetryPublisher::new(Divider(1862));

    let mut editor = LineEditor::<64>::new();
    for &byte in b"a console line that spans several frames\r\n" {
        if let Some(line) = editor.push(byte) {
            queue.try_submit(&line).unwrap();
        }
    }

    let mut periods = 0;
    block_on(publisher.run(&queue, &gate, &mut Immediate, &cancel, |_| {
        periods += 1;
        if periods == 2 {
            cancel.cancel();
        }
    }));
    assert_eq!(queue.len(), 3);

    let mut link = Link::default();
    let mut written = Vec::new();
    block_on(async {
        while !queue.is_empty() {
            written.push(write_next(&queue, &mut link, DEFAULT_FRAME_SIZE).await.unwrap());
        }
    });

    assert_eq!(written, [3, 1, 1]);
    let joined = link.frames.concat();
    assert_eq!(
        joined,
        b"a console line that spans several frames\nVBat: 3000\nVBat: 3000\n"
    );
}

#[test]
fn test_disconnect_discards_queue_and_recovers() {
    let queue = OutboundQueue::<NoopRawMutex, 4, 32>::new();
    queue.try_submit(b"stale 1\n").unwrap();
    queue.try_submit(b"stale 2\n").unwrap();

    assert_eq!(queue.clear(), 2);
    queue.try_submit(b"fresh\n").unwrap();

    let mut link = Link::default();
    assert_eq!(block_on(write_next(&queue, &mut link, DEFAULT_FRAME_SIZE)), Ok(1));
    assert_eq!(link.frames, [b"fresh\n".to_vec()]);
}
