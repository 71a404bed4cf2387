//! Protocol constants for the oracle contract family.
//!
//! These values are fixed by the deployed contracts and must not drift from them.

use alloy_primitives::B256;
use alloy_sol_types::SolEvent;

use crate::request::parse::OracleRequest;

/// Canonical signature of the `OracleRequest` event emitted by the oracle contract.
pub const ORACLE_REQUEST_EVENT_SIGNATURE: &str =
    "OracleRequest(bytes32,address,bytes32,uint256,address,bytes4,uint256,uint256,bytes)";

/// Keccak256 hash of [`ORACLE_REQUEST_EVENT_SIGNATURE`], found in topic slot 0.
pub const ORACLE_REQUEST_TOPIC: B256 = B256::new(OracleRequest::SIGNATURE_HASH.0);

/// Signature of the oracle entry point reached through `transferAndCall`.
pub const ORACLE_REQUEST_FN_SIGNATURE: &str =
    "oracleRequest(address,uint256,bytes32,address,bytes4,uint256,uint256,bytes)";

/// Signature of the oracle fulfillment entry point.
pub const FULFILL_ORACLE_REQUEST_FN_SIGNATURE: &str =
    "fulfillOracleRequest(bytes32,uint256,address,bytes4,uint256,bytes32)";

/// Name of the struct parameter the coordinator interface takes the agreement through.
pub const AGREEMENT_PARAM_NAME: &str = "_agreement";

/// Opening byte of an indefinite-length CBOR map (major type 5, additional info 31).
pub const CBOR_INDEFINITE_MAP_START: u8 = 0xBF;

/// "break" stop code closing any indefinite-length CBOR item.
pub const CBOR_BREAK: u8 = 0xFF;

/// CBOR major type of maps.
pub const CBOR_MAJOR_TYPE_MAP: u8 = 5;

/// Maximum nesting of arrays, maps and tags accepted in a parameter block.
pub const MAX_CBOR_DEPTH: usize = 32;

/// Data version written by current requesters.
pub const DEFAULT_DATA_VERSION: u64 = 1;
