//! Hex and hashing helpers shared by the decoders.

use alloy_primitives::{hex, keccak256, B256};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("expected valid hex string, got: {0:?}")]
    NotHex(String),
    #[error("hex string has odd length: {0}")]
    OddLength(usize),
}

/// Validate a `0x`-prefixed hex string and return the digits after the prefix.
pub fn strip_hex_prefix(s: &str) -> Result<&str, HexError> {
    match s.strip_prefix("0x") {
        Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(digits),
        _ => Err(HexError::NotHex(s.to_string())),
    }
}

/// Decode a `0x`-prefixed hex string into bytes.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_hex_prefix(s)?;
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }
    // digits are validated above, so the only remaining failure is length
    hex::decode(digits).map_err(|_| HexError::NotHex(s.to_string()))
}

/// Encode bytes as a lowercase `0x`-prefixed hex string.
#[inline]
pub fn bytes_to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}

/// Keccak256 of `data`.
#[inline]
pub fn keccak(data: impl AsRef<[u8]>) -> B256 {
    keccak256(data)
}

/// The Solidity function selector for `signature`, as `0x` followed by 8 hex digits.
///
/// `signature` must be canonical: no spaces, no parameter names, e.g. `transfer(address,uint256)`.
pub fn function_selector(signature: &str) -> String {
    let hash = keccak256(signature.as_bytes());
    bytes_to_hex(&hash[..4])
}
