//! Reflecting the agreement struct layout out of a JSON interface document.
//!
//! The layout is read from the *input* of the first interface function (which takes the
//! struct as `_agreement`) because ABI outputs drop dynamic members such as `address[]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::FieldDescriptor;
use crate::config::AGREEMENT_PARAM_NAME;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid interface document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("interface document declares no function")]
    NoFunction,
    #[error("function {0:?} takes no parameters")]
    NoParameters(String),
    #[error("extracted wrong struct parameter: expected `_agreement: tuple`, got {name:?} of type {ty:?}")]
    UnexpectedParameter { name: String, ty: String },
    #[error("agreement component {0} is missing a name or a type")]
    IncompleteComponent(usize),
}

/// A JSON ABI document, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDocument(pub Vec<AbiEntry>);

/// One entry of a JSON ABI document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(default)]
    pub name: Option<String>,
    /// `function`, `event`, `constructor`, ... An omitted type means `function`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

/// A function or struct parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParam>>,
}

impl SchemaDocument {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The first entry describing a function.
    pub fn first_function(&self) -> Option<&AbiEntry> {
        self.0.iter().find(|entry| entry.kind.as_deref().map_or(true, |kind| kind == "function"))
    }
}

/// Names and types of the agreement struct members, in declaration order.
pub fn service_agreement_fields(doc: &SchemaDocument) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let function = doc.first_function().ok_or(SchemaError::NoFunction)?;
    let param = function
        .inputs
        .first()
        .ok_or_else(|| SchemaError::NoParameters(function.name.clone().unwrap_or_default()))?;

    let name = param.name.as_deref().unwrap_or_default();
    let ty = param.ty.as_deref().unwrap_or_default();
    if name != AGREEMENT_PARAM_NAME || ty != "tuple" {
        return Err(SchemaError::UnexpectedParameter { name: name.to_string(), ty: ty.to_string() });
    }

    let components = param.components.as_deref().unwrap_or_default();

    let fields = components
        .iter()
        .enumerate()
        .map(|(i, component)| match (component.name.as_deref(), component.ty.as_deref()) {
            (Some(name), Some(ty)) if !name.is_empty() && !ty.is_empty() => {
                Ok(FieldDescriptor::new(name, ty))
            }
            _ => Err(SchemaError::IncompleteComponent(i)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(target: "runlog::agreement", fields = fields.len(), "reflected agreement fields");
    Ok(fields)
}
