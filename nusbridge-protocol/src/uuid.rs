//! Nordic UART Service UUIDs
//!
//! Byte arrays are in big-endian (textual) order, as they appear in the
//! UUID string. Radio stacks that want little-endian must reverse them.

/// NUS service UUID: 6E400001-B5A3-F393-E0A9-E50E24DCCA9E
pub const NUS_SERVICE_UUID: [u8; 16] = [
    0x6e, 0x40, 0x00, 0x01, 0xb5, 0xa3, 0xf3, 0x93, 0xe0, 0xa9, 0xe5, 0x0e, 0x24, 0xdc, 0xca, 0x9e,
];

/// NUS RX characteristic UUID: 6E400002-B5A3-F393-E0A9-E50E24DCCA9E
///
/// Central → peripheral (write, write without response)
pub const NUS_RX_CHAR_UUID: [u8; 16] = [
    0x6e, 0x40, 0x00, 0x02, 0xb5, 0xa3, 0xf3, 0x93, 0xe0, 0xa9, 0xe5, 0x0e, 0x24, 0xdc, 0xca, 0x9e,
];

/// NUS TX characteristic UUID: 6E400003-B5A3-F393-E0A9-E50E24DCCA9E
///
/// Peripheral → central (notify, read)
pub const NUS_TX_CHAR_UUID: [u8; 16] = [
    0x6e, 0x40, 0x00, 0x03, 0xb5, 0xa3, 0xf3, 0x93, 0xe0, 0xa9, 0xe5, 0x0e, 0x24, 0xdc, 0xca, 0x9e,
];

/// Service UUID in little-endian order, as carried in advertising data
pub const fn service_uuid_le() -> [u8; 16] {
    let mut out = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        out[i] = NUS_SERVICE_UUID[15 - i];
        i += 1;
    }
    out
}
