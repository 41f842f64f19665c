//! Reconstructs a validated record view from serialized N-Quads text and
//! exposes its provenance and content triples.

use crate::consts::{DESCRIBES, IS_IN_SCOPE};
use crate::errors::RecordError;
use anyhow::Result;
use log::debug;
use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{
    Dataset, GraphNameRef, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, TermRef,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// custom derive for NamedNode
fn namednode_ser<S>(namednode: &NamedNode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(namednode.as_str())
}

fn namednode_de<'de, D>(deserializer: D) -> Result<NamedNode, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NamedNode::new(s).map_err(serde::de::Error::custom)
}

/// JSON-facing summary of a record's identity and memberships.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct RecordMetadata {
    #[serde(serialize_with = "namednode_ser", deserialize_with = "namednode_de")]
    pub id: NamedNode,
    pub scopes: Vec<String>,
    pub describes: Vec<String>,
}

/// A record reconstructed from N-Quads text.
///
/// Immutable after construction; the triple lists returned by
/// [`provenance`](Self::provenance) and [`content`](Self::content) are
/// snapshots, not live views. Store iteration order feeds those lists, so
/// consumers must not rely on their ordering and should compare as sets.
pub struct Record {
    id: NamedNode,
    dataset: Dataset,
}

impl Record {
    /// Parses N-Quads text into a record.
    ///
    /// The text must describe a dataset split into exactly two partitions:
    /// one named graph (the record's own graph, whose name becomes the
    /// record identity) and the implicit default graph. Anything else
    /// fails with [`RecordError::MalformedRecord`]. Syntax errors from the
    /// underlying parser propagate unchanged.
    pub fn parse(text: &str) -> Result<Self> {
        let mut dataset = Dataset::new();
        let parser = RdfParser::from_format(RdfFormat::NQuads).for_reader(text.as_bytes());
        for quad in parser {
            let quad = quad?;
            dataset.insert(quad.as_ref());
        }

        // the default graph is structurally implicit, so the two-partition
        // check reduces to: exactly one distinct named graph
        let mut names: Vec<NamedOrBlankNode> = Vec::new();
        for quad in dataset.iter() {
            let name: NamedOrBlankNode = match quad.graph_name {
                GraphNameRef::DefaultGraph => continue,
                GraphNameRef::NamedNode(n) => n.into_owned().into(),
                GraphNameRef::BlankNode(b) => b.into_owned().into(),
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
        if names.len() != 1 {
            return Err(RecordError::MalformedRecord(format!(
                "expected exactly one named graph beside the default graph, found {}",
                names.len()
            ))
            .into());
        }
        let id = match names.remove(0) {
            NamedOrBlankNode::NamedNode(n) => n,
            NamedOrBlankNode::BlankNode(b) => {
                return Err(RecordError::MalformedRecord(format!(
                    "record graph {} is not named by an IRI",
                    b
                ))
                .into());
            }
        };
        debug!("parsed record {} with {} quads", id, dataset.len());

        Ok(Record { id, dataset })
    }

    /// The record's identity: the name of its own graph.
    pub fn id(&self) -> NamedNodeRef {
        self.id.as_ref()
    }

    fn graphname(&self) -> GraphNameRef {
        GraphNameRef::NamedNode(self.id.as_ref())
    }

    fn own_graph_triples(&self, from_record_subject: bool) -> Vec<(String, String, String)> {
        let graphname = self.graphname();
        self.dataset
            .iter()
            .filter(|quad| quad.graph_name == graphname)
            .filter(|quad| subject_is(quad.subject, self.id.as_ref()) == from_record_subject)
            .map(|quad| {
                (
                    subject_to_string(quad.subject),
                    quad.predicate.as_str().to_string(),
                    term_to_string(quad.object),
                )
            })
            .collect()
    }

    /// Self-describing triples: everything in the record's own graph whose
    /// subject is the record itself. Never empty on a parsed record built
    /// by [`RecordBuilder`](crate::RecordBuilder); at minimum the type
    /// declaration is present.
    pub fn provenance(&self) -> Vec<(String, String, String)> {
        self.own_graph_triples(true)
    }

    /// Content triples: everything in the record's own graph declared
    /// about subjects other than the record itself. Quads living in the
    /// default graph belong to neither list but survive re-serialization.
    pub fn content(&self) -> Vec<(String, String, String)> {
        self.own_graph_triples(false)
    }

    fn membership_objects(&self, predicate: NamedNodeRef) -> Vec<String> {
        let graphname = self.graphname();
        let mut objects: Vec<String> = self
            .dataset
            .iter()
            .filter(|quad| quad.graph_name == graphname)
            .filter(|quad| subject_is(quad.subject, self.id.as_ref()))
            .filter(|quad| quad.predicate == predicate)
            .map(|quad| term_to_string(quad.object))
            .collect();
        objects.sort();
        objects
    }

    /// The scopes this record declares membership in, sorted.
    pub fn scopes(&self) -> Vec<String> {
        self.membership_objects(IS_IN_SCOPE)
    }

    /// The entities this record describes, sorted.
    pub fn describes(&self) -> Vec<String> {
        self.membership_objects(DESCRIBES)
    }

    pub fn metadata(&self) -> RecordMetadata {
        RecordMetadata {
            id: self.id.clone(),
            scopes: self.scopes(),
            describes: self.describes(),
        }
    }

    /// JSON rendering of the record summary.
    pub fn dump(&self) -> String {
        serde_json::to_string_pretty(&self.metadata()).unwrap()
    }

    /// Serializes the whole two-graph dataset back to N-Quads text.
    ///
    /// The output parses back into an equivalent record; quad ordering and
    /// formatting are not preserved.
    pub fn to_text(&self) -> Result<String> {
        let mut serializer = RdfSerializer::from_format(RdfFormat::NQuads).for_writer(Vec::new());
        for quad in self.dataset.iter() {
            serializer.serialize_quad(quad)?;
        }
        let buffer = serializer.finish()?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text().map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("quads", &self.dataset.len())
            .finish()
    }
}

// equality is semantic: same identity, same provenance and content sets,
// quad ordering ignored
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if self.id != other.id {
            return false;
        }
        let sorted = |mut triples: Vec<(String, String, String)>| {
            triples.sort();
            triples
        };
        sorted(self.provenance()) == sorted(other.provenance())
            && sorted(self.content()) == sorted(other.content())
    }
}

impl Eq for Record {}

fn subject_is(subject: NamedOrBlankNodeRef, id: NamedNodeRef) -> bool {
    matches!(subject, NamedOrBlankNodeRef::NamedNode(n) if n == id)
}

// plain-string rendering: IRIs bare, blank nodes labelled, literals by
// lexical value
fn subject_to_string(subject: NamedOrBlankNodeRef) -> String {
    match subject {
        NamedOrBlankNodeRef::NamedNode(n) => n.as_str().to_string(),
        NamedOrBlankNodeRef::BlankNode(b) => b.to_string(),
    }
}

fn term_to_string(term: TermRef) -> String {
    match term {
        TermRef::NamedNode(n) => n.as_str().to_string(),
        TermRef::BlankNode(b) => b.to_string(),
        TermRef::Literal(l) => l.value().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_DOC: &str = "\
<https://example.com/id/1> <http://example.com/a> <http://rdf.equinor.com/record/Record> <https://example.com/id/1> .
<https://example.com/id/1> <https://example.com/isInScope> <https://example.com/scope/1> <https://example.com/id/1> .
<https://example.com/object/1> <https://example.com/weight> \"42\" <https://example.com/id/1> .
";

    #[test]
    fn test_parse_record_document() {
        let record = Record::parse(RECORD_DOC).unwrap();
        assert_eq!(record.id().as_str(), "https://example.com/id/1");
        assert_eq!(record.provenance().len(), 2);
        assert_eq!(
            record.content(),
            vec![(
                "https://example.com/object/1".to_string(),
                "https://example.com/weight".to_string(),
                "42".to_string(),
            )]
        );
        assert_eq!(record.scopes(), vec!["https://example.com/scope/1"]);
    }

    #[test]
    fn test_parse_empty_text_is_malformed() {
        let err = Record::parse("").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_default_graph_only_is_malformed() {
        let doc = "<http://ex.com/s> <http://ex.com/p> <http://ex.com/o> .\n";
        let err = Record::parse(doc).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_two_named_graphs_is_malformed() {
        let doc = "\
<http://ex.com/s> <http://ex.com/p> <http://ex.com/o> <http://ex.com/g1> .
<http://ex.com/s> <http://ex.com/p> <http://ex.com/o> <http://ex.com/g2> .
";
        let err = Record::parse(doc).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_blank_graph_name_is_malformed() {
        let doc = "<http://ex.com/s> <http://ex.com/p> <http://ex.com/o> _:g .\n";
        let err = Record::parse(doc).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_syntax_error_propagates_unwrapped() {
        let err = Record::parse("this is not nquads").unwrap_err();
        assert!(err.downcast_ref::<RecordError>().is_none());
    }

    #[test]
    fn test_default_graph_quads_are_kept_but_not_listed() {
        let doc = "\
<https://example.com/id/1> <http://example.com/a> <http://rdf.equinor.com/record/Record> <https://example.com/id/1> .
<http://ex.com/s> <http://ex.com/p> \"loose\" .
";
        let record = Record::parse(doc).unwrap();
        assert_eq!(record.provenance().len(), 1);
        assert!(record.content().is_empty());
        // the default-graph quad survives the round-trip
        let reparsed = Record::parse(&record.to_text().unwrap()).unwrap();
        assert!(reparsed.to_text().unwrap().contains("loose"));
    }

    #[test]
    fn test_literal_terms_render_by_lexical_value() {
        let doc = "\
<https://example.com/id/1> <http://example.com/a> <http://rdf.equinor.com/record/Record> <https://example.com/id/1> .
<http://ex.com/s> <http://ex.com/p> \"5\"^^<http://www.w3.org/2001/XMLSchema#integer> <https://example.com/id/1> .
<http://ex.com/s> <http://ex.com/q> \"hei\"@no <https://example.com/id/1> .
";
        let record = Record::parse(doc).unwrap();
        let mut content = record.content();
        content.sort();
        assert_eq!(
            content,
            vec![
                (
                    "http://ex.com/s".to_string(),
                    "http://ex.com/p".to_string(),
                    "5".to_string(),
                ),
                (
                    "http://ex.com/s".to_string(),
                    "http://ex.com/q".to_string(),
                    "hei".to_string(),
                ),
            ]
        );
    }

    #[test]
    fn test_reserialization_round_trips() {
        let record = Record::parse(RECORD_DOC).unwrap();
        let reparsed = Record::parse(&record.to_text().unwrap()).unwrap();
        assert_eq!(record, reparsed);
    }

    #[test]
    fn test_display_matches_to_text() {
        let record = Record::parse(RECORD_DOC).unwrap();
        assert_eq!(record.to_string(), record.to_text().unwrap());
    }

    #[test]
    fn test_metadata_json_round_trip() {
        let record = Record::parse(RECORD_DOC).unwrap();
        let metadata: RecordMetadata = serde_json::from_str(&record.dump()).unwrap();
        assert_eq!(metadata, record.metadata());
    }
}
