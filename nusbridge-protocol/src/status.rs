//! Telemetry status lines
//!
//! Status lines are plain ASCII terminated by `\n`, so a terminal app on
//! the central shows one reading per line:
//!
//! ```text
//! VBat: 3000\n
//! ```

use core::fmt::Write;
use heapless::String;

/// Maximum encoded status line length
pub const STATUS_LINE_CAPACITY: usize = 32;

/// Battery reading prefix
const BATTERY_PREFIX: &str = "VBat: ";

/// One encoded telemetry line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    text: String<STATUS_LINE_CAPACITY>,
}

impl StatusLine {
    /// Encode a battery reading in millivolts
    pub fn battery(millivolts: u32) -> Self {
        let mut text = String::new();
        // Prefix (6) + u32 digits (max 10) + terminator fits the capacity
        let _ = writeln!(text, "{}{}", BATTERY_PREFIX, millivolts);
        Self { text }
    }

    /// Encoded line as text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Encoded line as bytes, ready for the frame chunker
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Encoded length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusLine {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}
