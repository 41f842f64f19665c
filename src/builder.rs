//! Accumulates a record's identity, memberships and content triples, then
//! emits the record as a freshly serialized two-graph N-Quads document.

use crate::consts::{DESCRIBES, IS_IN_SCOPE, RECORD_TYPE, TYPE};
use crate::errors::RecordError;
use crate::iri::{to_iri, IriValue};
use crate::record::Record;
use anyhow::Result;
use log::debug;
use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::{Dataset, GraphNameRef, NamedNode, QuadRef, Triple};

/// Transient accumulator for a new record.
///
/// Configured through chained `with_*` calls and consumed exactly once by
/// [`build`](Self::build). The fallible setters return `Result<Self>` so a
/// chain reads as `RecordBuilder::new().with_id(..)?.with_scope(..)?`.
///
/// Scopes and describes entries accumulate in declaration order; repeated
/// declarations are kept in the builder and collapse only when the
/// identical membership quads meet in the quad store.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    id: Option<NamedNode>,
    scopes: Vec<NamedNode>,
    describes: Vec<NamedNode>,
    content: Vec<Triple>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the record identity. Accepts a raw string or a typed IRI;
    /// calling it again overwrites the previous identity.
    pub fn with_id(mut self, id: impl Into<IriValue>) -> Result<Self> {
        self.id = Some(to_iri(id)?);
        Ok(self)
    }

    /// Declares membership in a scope. Same input forms as
    /// [`with_id`](Self::with_id).
    pub fn with_scope(mut self, scope: impl Into<IriValue>) -> Result<Self> {
        self.scopes.push(to_iri(scope)?);
        Ok(self)
    }

    /// Declares membership in each of the given scopes.
    pub fn with_scopes<I>(mut self, scopes: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<IriValue>,
    {
        for scope in scopes {
            self.scopes.push(to_iri(scope)?);
        }
        Ok(self)
    }

    /// Declares an entity this record describes.
    pub fn with_describes(mut self, entity: impl Into<IriValue>) -> Result<Self> {
        self.describes.push(to_iri(entity)?);
        Ok(self)
    }

    /// Declares each of the given entities as described by this record.
    pub fn with_describes_all<I>(mut self, entities: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<IriValue>,
    {
        for entity in entities {
            self.describes.push(to_iri(entity)?);
        }
        Ok(self)
    }

    /// Attaches a content triple. Content triples are written into the
    /// record's own graph next to the provenance triples.
    pub fn with_content(mut self, triple: Triple) -> Self {
        self.content.push(triple);
        self
    }

    /// Assembles the two-graph dataset, serializes it to N-Quads and
    /// returns the record parsed back from that text. Serialization is the
    /// interface: the returned [`Record`] holds no reference to this
    /// builder.
    ///
    /// Fails with [`RecordError::InvalidState`] when no identity was set.
    pub fn build(self) -> Result<Record> {
        let id = self
            .id
            .ok_or_else(|| RecordError::InvalidState("record id is not set".to_string()))?;
        let graphname = GraphNameRef::NamedNode(id.as_ref());

        let mut dataset = Dataset::new();
        dataset.insert(QuadRef::new(id.as_ref(), TYPE, RECORD_TYPE, graphname));
        for scope in &self.scopes {
            dataset.insert(QuadRef::new(
                id.as_ref(),
                IS_IN_SCOPE,
                scope.as_ref(),
                graphname,
            ));
        }
        for entity in &self.describes {
            dataset.insert(QuadRef::new(
                id.as_ref(),
                DESCRIBES,
                entity.as_ref(),
                graphname,
            ));
        }
        for triple in &self.content {
            let t = triple.as_ref();
            dataset.insert(QuadRef::new(t.subject, t.predicate, t.object, graphname));
        }
        debug!("built record {} with {} quads", id, dataset.len());

        let mut serializer = RdfSerializer::from_format(RdfFormat::NQuads).for_writer(Vec::new());
        for quad in dataset.iter() {
            serializer.serialize_quad(quad)?;
        }
        let buffer = serializer.finish()?;
        let text = String::from_utf8(buffer)?;

        Record::parse(&text)
    }
}
