use crate::{
    config::{FULFILL_ORACLE_REQUEST_FN_SIGNATURE, ORACLE_REQUEST_FN_SIGNATURE},
    util::{bytes_to_hex, function_selector, hex_to_bytes, keccak, strip_hex_prefix, HexError},
};
use alloy_primitives::keccak256;

#[test]
fn test_strip_hex_prefix() {
    assert_eq!(strip_hex_prefix("0xdeadBEEF"), Ok("deadBEEF"));
    assert_eq!(strip_hex_prefix("0x"), Ok(""));
    assert_eq!(strip_hex_prefix("0xabc"), Ok("abc"));
}

#[test]
fn test_strip_hex_prefix_rejects_non_hex() {
    for input in ["deadbeef", "0xzz", "0X12", "", "0x12 34", "hello"] {
        assert_eq!(strip_hex_prefix(input), Err(HexError::NotHex(input.to_string())), "{input}");
    }
}

#[test]
fn test_hex_to_bytes() {
    assert_eq!(hex_to_bytes("0x00ff10").unwrap(), vec![0x00, 0xff, 0x10]);
    assert_eq!(hex_to_bytes("0x").unwrap(), Vec::<u8>::new());
    assert_eq!(hex_to_bytes("0xabc"), Err(HexError::OddLength(3)));
    assert!(matches!(hex_to_bytes("abcd"), Err(HexError::NotHex(_))));
}

#[test]
fn test_bytes_to_hex() {
    assert_eq!(bytes_to_hex([0xde, 0xad, 0xbe, 0xef]), "0xdeadbeef");
    assert_eq!(bytes_to_hex(b""), "0x");
}

#[test]
fn test_keccak_is_plain_keccak256() {
    assert_eq!(keccak(b"hello"), keccak256(b"hello"));
    // keccak256 of the empty string
    assert_eq!(
        keccak(b"").to_string(),
        "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );
}

#[test]
fn test_oracle_request_selector() {
    let selector = function_selector(ORACLE_REQUEST_FN_SIGNATURE);

    assert_eq!(selector, "0x40429946");
    assert_eq!(selector, bytes_to_hex(&keccak256(ORACLE_REQUEST_FN_SIGNATURE)[..4]));
}

#[test]
fn test_fulfill_selector() {
    assert_eq!(function_selector(FULFILL_ORACLE_REQUEST_FN_SIGNATURE), "0x4ab0d190");
}

#[test]
fn test_callback_selector() {
    // Selector consumers pass as the fulfillment callback in the request tests
    assert_eq!(function_selector("requestedBytes32(bytes32,bytes32)"), "0xed53e511");
}

#[test]
fn test_selector_format() {
    let selector = function_selector("transfer(address,uint256)");
    assert_eq!(selector, "0xa9059cbb");
    assert_eq!(selector.len(), 10);
}
