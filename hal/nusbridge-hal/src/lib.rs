//! NUS bridge hardware abstraction layer
//!
//! This crate defines the narrow interfaces the bridge core consumes from
//! the radio stack and the board. Chip-specific crates implement them, and
//! host tests implement them with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nusbridge-core (bridge logic)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nusbridge-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ nusbridge-    │       │  host test    │
//! │   hal-nrf     │       │    fakes      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`radio::Notifier`] - Outbound notification writes to the connected peer
//! - [`analog::AnalogSource`] - Raw analog samples (battery divider)
//! - [`gpio::InputPin`] - Digital input (user button)
//!
//! The local byte sink is not abstracted here: the core uses
//! `embedded_io_async::Write` directly.

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod radio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use analog::AnalogSource;
pub use gpio::{ActiveLow, InputPin};
pub use radio::{LinkError, Notifier};
pub use uart::SerialConfig;
