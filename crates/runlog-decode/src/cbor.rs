//! "Diet" CBOR parameter blocks.
//!
//! Requesters build their job parameters as an indefinite-length CBOR map and then drop the
//! opening `0xBF` and closing `0xFF` bytes before the request goes on chain, to save gas.
//! [`add_cbor_map_delimiters`] restores them and [`parse_params`] decodes the result.
//!
//! The repair is a heuristic: any buffer whose first byte is not a map header is assumed to be
//! an elided map, so a block that legitimately holds some other CBOR type gets wrapped anyway.

use std::borrow::Cow;

use alloy_primitives::{map::IndexMap, Bytes};
use minicbor::{data::Type, Decoder};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::{CBOR_BREAK, CBOR_INDEFINITE_MAP_START, CBOR_MAJOR_TYPE_MAP, MAX_CBOR_DEPTH},
    util::{hex_to_bytes, HexError},
};

/// Decoded parameter block: text keys to values, in encoding order.
///
/// A repeated key keeps its first position and takes the last value.
pub type CborMap = IndexMap<String, CborValue>;

#[derive(Debug, Error)]
pub enum CborError {
    #[error("cbor decode: {0}")]
    Decode(#[from] minicbor::decode::Error),
    #[error("expected a map at the top level, found {0}")]
    NotAMap(String),
    #[error("map key is not a text string")]
    NonTextKey,
    #[error("{0} trailing bytes after the parameter map")]
    TrailingBytes(usize),
    #[error("nesting deeper than {} levels", MAX_CBOR_DEPTH)]
    DepthExceeded,
    #[error("unsupported CBOR item: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Hex(#[from] HexError),
}

/// A decoded CBOR data item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CborValue {
    Null,
    Undefined,
    Bool(bool),
    /// Major types 0 and 1; `i128` covers the full `-2^64..2^64` range.
    Integer(i128),
    Float(f64),
    Bytes(Bytes),
    Text(String),
    Array(Vec<CborValue>),
    Map(CborMap),
    Simple(u8),
    Tag(u64, Box<CborValue>),
}

impl CborValue {
    /// Short name of the item kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Simple(_) => "simple",
            Self::Tag(..) => "tag",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

/// Returns true if the first byte of `buf` carries CBOR major type 5 (map).
#[inline]
pub fn starts_with_map(buf: &[u8]) -> bool {
    buf.first().is_some_and(|b| b >> 5 == CBOR_MAJOR_TYPE_MAP)
}

/// Add the indefinite-map opening and closing bytes unless `buf` already starts with a map.
///
/// An empty buffer becomes `0xBF 0xFF`, the empty map.
pub fn add_cbor_map_delimiters(buf: &[u8]) -> Cow<'_, [u8]> {
    if starts_with_map(buf) {
        return Cow::Borrowed(buf);
    }

    let mut out = Vec::with_capacity(buf.len() + 2);
    out.push(CBOR_INDEFINITE_MAP_START);
    out.extend_from_slice(buf);
    out.push(CBOR_BREAK);
    Cow::Owned(out)
}

/// Repair `buf` and decode it as a single CBOR map with text keys.
pub fn parse_params(buf: &[u8]) -> Result<CborMap, CborError> {
    let repaired = add_cbor_map_delimiters(buf);
    let mut dec = Decoder::new(&repaired);

    let value = decode_value(&mut dec, 0)?;
    let trailing = repaired.len() - dec.position();
    if trailing != 0 {
        return Err(CborError::TrailingBytes(trailing));
    }

    match value {
        CborValue::Map(map) => {
            tracing::trace!(target: "runlog::cbor", keys = map.len(), "decoded parameter map");
            Ok(map)
        }
        other => Err(CborError::NotAMap(other.kind().to_string())),
    }
}

/// Decode a `0x`-prefixed hex parameter block, repairing its delimiters first.
pub fn decode_diet_cbor(hex: &str) -> Result<CborMap, CborError> {
    let buf = hex_to_bytes(hex)?;
    parse_params(&buf)
}

fn decode_value(dec: &mut Decoder<'_>, depth: usize) -> Result<CborValue, CborError> {
    if depth > MAX_CBOR_DEPTH {
        return Err(CborError::DepthExceeded);
    }

    let value = match dec.datatype()? {
        Type::Null => {
            dec.null()?;
            CborValue::Null
        }
        Type::Undefined => {
            dec.undefined()?;
            CborValue::Undefined
        }
        Type::Bool => CborValue::Bool(dec.bool()?),
        Type::U8 |
        Type::U16 |
        Type::U32 |
        Type::U64 |
        Type::I8 |
        Type::I16 |
        Type::I32 |
        Type::I64 |
        Type::Int => CborValue::Integer(i128::from(dec.int()?)),
        Type::F16 => CborValue::Float(f64::from(dec.f16()?)),
        Type::F32 => CborValue::Float(f64::from(dec.f32()?)),
        Type::F64 => CborValue::Float(dec.f64()?),
        Type::Simple => CborValue::Simple(dec.simple()?),
        Type::Bytes => CborValue::Bytes(Bytes::copy_from_slice(dec.bytes()?)),
        Type::BytesIndef => {
            let mut out = Vec::new();
            for chunk in dec.bytes_iter()? {
                out.extend_from_slice(chunk?);
            }
            CborValue::Bytes(Bytes::from(out))
        }
        Type::String => CborValue::Text(dec.str()?.to_string()),
        Type::StringIndef => {
            let mut out = String::new();
            for chunk in dec.str_iter()? {
                out.push_str(chunk?);
            }
            CborValue::Text(out)
        }
        Type::Array | Type::ArrayIndef => {
            let len = dec.array()?;
            let mut items = Vec::new();
            while next_entry(dec, len, items.len())? {
                items.push(decode_value(dec, depth + 1)?);
            }
            CborValue::Array(items)
        }
        Type::Map | Type::MapIndef => {
            let len = dec.map()?;
            let mut map = CborMap::default();
            let mut read = 0;
            while next_entry(dec, len, read)? {
                let key = match decode_value(dec, depth + 1)? {
                    CborValue::Text(key) => key,
                    _ => return Err(CborError::NonTextKey),
                };
                let value = decode_value(dec, depth + 1)?;
                map.insert(key, value);
                read += 1;
            }
            CborValue::Map(map)
        }
        Type::Tag => {
            let tag = dec.tag()?;
            CborValue::Tag(tag.as_u64(), Box::new(decode_value(dec, depth + 1)?))
        }
        other => return Err(CborError::Unsupported(format!("{other:?}"))),
    };

    Ok(value)
}

/// Whether another entry follows in an array or map that has read `read` entries so far.
///
/// Definite containers stop at their length. Indefinite ones stop at the break byte,
/// which is consumed here.
fn next_entry(dec: &mut Decoder<'_>, len: Option<u64>, read: usize) -> Result<bool, CborError> {
    match len {
        Some(len) => Ok((read as u64) < len),
        None => {
            if dec.datatype()? == Type::Break {
                dec.set_position(dec.position() + 1);
                Ok(false)
            } else {
                Ok(true)
            }
        }
    }
}
