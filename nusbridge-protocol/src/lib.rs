//! Nordic UART Service wire protocol
//!
//! NUS carries an unframed byte stream in both directions:
//!
//! ```text
//! central ── write RX (6E400002) ──▶ peripheral    inbound bytes
//! central ◀── notify TX (6E400003) ── peripheral   outbound frames
//! ```
//!
//! There is no header, length or checksum on the air. The only wire-level
//! constraint is that every notification carries at most one ATT payload,
//! so outbound messages are sliced into frames of at most
//! [`DEFAULT_FRAME_SIZE`] bytes (the payload left by the minimum ATT MTU).
//! The peer reassembles by simple concatenation, in order.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod status;
pub mod uuid;

pub use frame::{
    frame_count, l2cap_mtu_for_frame, FrameError, Frames, DEFAULT_FRAME_SIZE, MAX_NOTIFY_PAYLOAD,
};
pub use status::{StatusLine, STATUS_LINE_CAPACITY};
pub use uuid::{NUS_RX_CHAR_UUID, NUS_SERVICE_UUID, NUS_TX_CHAR_UUID};
