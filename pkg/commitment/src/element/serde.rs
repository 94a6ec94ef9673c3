//! Elements are written as 64 hex characters, big-endian, so roots and keys read the same in
//! JSON as they do in logs (modulo padding)

use ethnum::U256;
use serde::{de::Error, Deserialize, Deserializer, Serializer};

pub(super) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(value.to_be_bytes()))
}

/// Exactly 32 bytes of hex, optionally prefixed with `0x`
pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let text = String::deserialize(deserializer)?;

    let mut bytes = [0; 32];
    hex::decode_to_slice(text.strip_prefix("0x").unwrap_or(&text), &mut bytes)
        .map_err(D::Error::custom)?;

    Ok(U256::from_be_bytes(bytes))
}
