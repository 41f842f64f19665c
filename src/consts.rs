//! Defines constant NamedNodeRefs for the record vocabulary: the type
//! declaration predicate, the Record class, and the membership predicates.
//!
//! These IRIs are fixed by the record wire format and must not change, or
//! documents stop being readable by existing record consumers.

use oxigraph::model::NamedNodeRef;

pub const TYPE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.com/a");
pub const RECORD_TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://rdf.equinor.com/record/Record");

// membership predicates
pub const IS_IN_SCOPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://example.com/isInScope");
pub const DESCRIBES: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://example.com/describes");
