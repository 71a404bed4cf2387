//! Crate-level error type.

use thiserror::Error;

use crate::{
    agreement::{DigestError, SchemaError},
    cbor::CborError,
    request::RequestError,
    util::HexError,
};

/// Any failure from the decoders or the digest path.
///
/// None of these are transient: retrying with the same input fails the same way.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was not `0x`-prefixed hex.
    #[error("format error: {0}")]
    Format(#[from] HexError),

    /// Missing log, missing topic, malformed ABI body or out-of-range data version.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Parameter block is not valid CBOR after delimiter repair.
    #[error("parse error: {0}")]
    Parse(#[from] CborError),

    /// Interface document does not have the expected agreement parameter.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Agreement value is missing a field or holds a value of the wrong type.
    #[error("digest error: {0}")]
    Digest(#[from] DigestError),
}
