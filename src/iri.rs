//! Normalization of caller-supplied identifiers into typed IRIs.
//!
//! Record identities and memberships arrive either as raw strings or as
//! already-typed IRI references. Both funnel through [`to_iri`] so the
//! accepted input forms are decided in one place.

use crate::errors::RecordError;
use oxigraph::model::{NamedNode, NamedNodeRef};

/// A value that may name a resource: an already-typed IRI, or raw text
/// that still has to be validated.
#[derive(Debug, Clone)]
pub enum IriValue {
    Iri(NamedNode),
    Text(String),
}

impl From<NamedNode> for IriValue {
    fn from(iri: NamedNode) -> Self {
        IriValue::Iri(iri)
    }
}

impl From<&NamedNode> for IriValue {
    fn from(iri: &NamedNode) -> Self {
        IriValue::Iri(iri.clone())
    }
}

impl From<NamedNodeRef<'_>> for IriValue {
    fn from(iri: NamedNodeRef<'_>) -> Self {
        IriValue::Iri(iri.into_owned())
    }
}

impl From<&str> for IriValue {
    fn from(text: &str) -> Self {
        IriValue::Text(text.to_string())
    }
}

impl From<String> for IriValue {
    fn from(text: String) -> Self {
        IriValue::Text(text)
    }
}

/// Normalizes a string-or-IRI input into a `NamedNode`. Typed IRIs pass
/// through untouched; text must parse as an absolute IRI.
pub fn to_iri(value: impl Into<IriValue>) -> Result<NamedNode, RecordError> {
    match value.into() {
        IriValue::Iri(iri) => Ok(iri),
        IriValue::Text(text) => NamedNode::new(text.as_str()).map_err(|e| {
            RecordError::InvalidArgument(format!("{:?} is not an IRI: {}", text, e))
        }),
    }
}
