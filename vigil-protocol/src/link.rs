//! Link identity shared by the firmware and peers
//!
//! One service, one characteristic, same UUID for both - peers tell them
//! apart by attribute type, not by UUID.

/// Advertised device name
pub const DEVICE_NAME: &str = "Vigil";

/// GATT service UUID, as a peer's scanner displays it
pub const SERVICE_UUID: &str = "c38a205a-5dc3-4126-86d1-487028603576";

/// The state characteristic reuses the service UUID
pub const STATE_CHARACTERISTIC_UUID: &str = SERVICE_UUID;

/// Service UUID in the little-endian byte order advertising payloads carry
pub const SERVICE_UUID_LE: [u8; 16] = [
    0x76, 0x35, 0x60, 0x28, 0x70, 0x48, 0xd1, 0x86, 0x26, 0x41, 0xc3, 0x5d, 0x5a, 0x20, 0x8a, 0xc3,
];
