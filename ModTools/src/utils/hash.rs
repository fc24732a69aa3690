//! Content-addressed identifiers
//!
//! Everything here is a pure function of its inputs so that generated GUIDs
//! and localization handles stay stable across rebuilds.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Derive a UUID from a namespace UUID and a key.
///
/// The UUID is the first 16 bytes of `SHA-256(namespace_bytes || key_bytes)`.
#[must_use]
pub fn name_uuid(namespace: &Uuid, key: &str) -> Uuid {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

/// Localization handle for a key: `h` followed by the derived UUID with
/// dashes replaced by `g`.
///
/// The engine only accepts `[0-9a-z]` in handles.
#[must_use]
pub fn loca_handle(mod_uuid: &Uuid, key: &str) -> String {
    let uuid = name_uuid(mod_uuid, key).hyphenated().to_string();
    format!("h{}", uuid.replace('-', "g"))
}
