//! Service agreements and their on-chain identifier.
//!
//! The coordinator contract indexes agreements by `keccak256(abi.encodePacked(...))` over the
//! struct fields in declaration order, and oracle nodes sign that same digest. The field order
//! is taken from the coordinator's interface document ([`schema`]) instead of being hardcoded,
//! so a regenerated document is enough to follow struct changes.

pub mod digest;
pub mod schema;

use std::collections::BTreeMap;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use digest::{encode_packed, service_agreement_digest, DigestError};
pub use schema::{service_agreement_fields, AbiEntry, AbiParam, SchemaDocument, SchemaError};

/// One field of the agreement struct, as declared in the interface document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

/// Agreement values keyed by field name. Iteration order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceAgreement {
    fields: BTreeMap<String, Value>,
}

impl ServiceAgreement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ServiceAgreement {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// The reflected agreement field list, kept around to digest many agreements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementSchema {
    fields: Vec<FieldDescriptor>,
}

impl AgreementSchema {
    /// Reflect the field list out of an interface document.
    pub fn from_document(doc: &SchemaDocument) -> Result<Self, SchemaError> {
        Ok(Self { fields: service_agreement_fields(doc)? })
    }

    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The agreement id: keccak256 of the packed field values, in schema order.
    #[inline]
    pub fn digest(&self, agreement: &ServiceAgreement) -> Result<B256, DigestError> {
        service_agreement_digest(agreement, &self.fields)
    }
}
