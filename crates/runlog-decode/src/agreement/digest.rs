//! `keccak256(abi.encodePacked(...))` over an agreement, in field descriptor order.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, B256};
use serde_json::Value;
use thiserror::Error;

use super::{FieldDescriptor, ServiceAgreement};

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("agreement is missing field {0:?}")]
    FieldMissing(String),
    #[error("field {field:?} has an unsupported type {ty:?}: {reason}")]
    InvalidType { field: String, ty: String, reason: String },
    #[error("field {field:?} is not a valid {ty}: {reason}")]
    InvalidValue { field: String, ty: String, reason: String },
}

/// The agreement id: keccak256 of the packed encoding of `agreement`'s values, taken in the
/// order of `fields`.
///
/// Must match the coordinator's `getId`, which hashes the struct members in declaration order.
pub fn service_agreement_digest(
    agreement: &ServiceAgreement,
    fields: &[FieldDescriptor],
) -> Result<B256, DigestError> {
    let packed = encode_packed(agreement, fields)?;
    let digest = keccak256(&packed);
    tracing::debug!(
        target: "runlog::agreement",
        fields = fields.len(),
        preimage_len = packed.len(),
        %digest,
        "computed agreement digest"
    );
    Ok(digest)
}

/// The digest preimage: each field's value coerced to its declared type and packed, without
/// padding, in the order of `fields`.
pub fn encode_packed(
    agreement: &ServiceAgreement,
    fields: &[FieldDescriptor],
) -> Result<Vec<u8>, DigestError> {
    let mut out = Vec::with_capacity(fields.len() * 32);
    for field in fields {
        let value = agreement
            .get(&field.name)
            .ok_or_else(|| DigestError::FieldMissing(field.name.clone()))?;
        let ty = DynSolType::parse(&field.ty).map_err(|e| DigestError::InvalidType {
            field: field.name.clone(),
            ty: field.ty.clone(),
            reason: e.to_string(),
        })?;
        let value = coerce(&ty, value).map_err(|reason| DigestError::InvalidValue {
            field: field.name.clone(),
            ty: field.ty.clone(),
            reason,
        })?;
        pack_into(&value, false, &mut out);
    }
    Ok(out)
}

/// Packed encoding, except that array elements take a full ABI word each: numbers and
/// addresses left-padded, `bytesN` right-padded. Strings and bytes stay raw even inside arrays.
fn pack_into(value: &DynSolValue, in_array: bool, out: &mut Vec<u8>) {
    match value {
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            for item in items {
                pack_into(item, true, out);
            }
        }
        DynSolValue::String(_) | DynSolValue::Bytes(_) => value.abi_encode_packed_to(out),
        _ if in_array => out.extend_from_slice(&value.abi_encode()),
        _ => value.abi_encode_packed_to(out),
    }
}

/// Coerce a JSON value to `ty`.
///
/// Strings go through the type's own parser (decimal or `0x` numbers, hex addresses and bytes,
/// `true`/`false`). Numbers and booleans are parsed from their JSON text. Arrays map element
/// by element onto `T[]` and `T[N]`.
fn coerce(ty: &DynSolType, value: &Value) -> Result<DynSolValue, String> {
    match (ty, value) {
        (DynSolType::Array(inner), Value::Array(items)) => {
            let items = items.iter().map(|item| coerce(inner, item)).collect::<Result<_, _>>()?;
            Ok(DynSolValue::Array(items))
        }
        (DynSolType::FixedArray(inner, len), Value::Array(items)) => {
            if items.len() != *len {
                return Err(format!("expected {len} elements, got {}", items.len()));
            }
            let items = items.iter().map(|item| coerce(inner, item)).collect::<Result<_, _>>()?;
            Ok(DynSolValue::FixedArray(items))
        }
        (_, Value::String(s)) => ty.coerce_str(s).map_err(|e| e.to_string()),
        (_, Value::Number(n)) => ty.coerce_str(&n.to_string()).map_err(|e| e.to_string()),
        (_, Value::Bool(b)) => {
            ty.coerce_str(if *b { "true" } else { "false" }).map_err(|e| e.to_string())
        }
        (_, other) => Err(format!("cannot coerce JSON {other} to {ty}")),
    }
}
