//! Build-time configuration
//!
//! `build.rs` validates `bridge.toml` and emits `BRIDGE` and `SERIAL`
//! constants; a bad file fails the build rather than the boot.

include!(concat!(env!("OUT_DIR"), "/bridge_config.rs"));
