//! Off-chain counterpart of the oracle contracts.
//!
//! This crate reproduces, bit for bit, what the oracle and coordinator contracts emit and
//! compute:
//! - Decoding `OracleRequest` event logs into [`RunRequest`]s
//! - Restoring and parsing the "diet" CBOR parameter blocks carried by requests
//! - Reflecting the service agreement struct layout from the coordinator's JSON interface
//! - Computing the packed keccak256 digest that identifies a service agreement
//!
//! Everything here is a pure function over its inputs: no I/O, no shared state.

mod error;

pub mod agreement;
pub mod cbor;
pub mod config;
pub mod request;
pub mod util;

#[cfg(test)]
mod tests;

pub use agreement::{
    encode_packed, service_agreement_digest, service_agreement_fields, AgreementSchema,
    DigestError, FieldDescriptor, SchemaDocument, SchemaError, ServiceAgreement,
};
pub use cbor::{add_cbor_map_delimiters, decode_diet_cbor, parse_params, CborError, CborMap, CborValue};
pub use config::{ORACLE_REQUEST_TOPIC, ORACLE_REQUEST_EVENT_SIGNATURE};
pub use error::Error;
pub use request::{
    decode_run_abi, decode_run_request, encode_fulfillment, encode_oracle_request,
    OracleRequestArgs, RawLog, RequestError, RunAbi, RunRequest,
};
pub use util::{bytes_to_hex, function_selector, hex_to_bytes, keccak, strip_hex_prefix, HexError};
