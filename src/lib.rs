//! Build and parse named-graph record documents.
//!
//! A record is an RDF dataset split into exactly two partitions: the
//! record's own named graph, holding its self-describing provenance
//! triples and any content triples, and the implicit default graph.
//! [`RecordBuilder`] assembles a new record and emits it as N-Quads text;
//! [`Record`] reconstructs a validated view from that text and can
//! re-serialize itself.
//!
//! ```no_run
//! use rdfrecord::RecordBuilder;
//!
//! # fn main() -> anyhow::Result<()> {
//! let record = RecordBuilder::new()
//!     .with_id("https://example.com/id/1")?
//!     .with_scope("https://example.com/scope/1")?
//!     .build()?;
//! println!("{}", record);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod consts;
pub mod errors;
pub mod iri;
pub mod record;

pub use builder::RecordBuilder;
pub use errors::RecordError;
pub use record::{Record, RecordMetadata};

/// Initializes logging for the rdfrecord library.
///
/// This function checks for the `RECORD_LOG` environment variable. If it is
/// set, `RUST_LOG` is set to its value. `RECORD_LOG` takes precedence over
/// `RUST_LOG`. The logger initialization (e.g., `env_logger::init()`) must
/// be called after this function for the log level to take effect.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("RECORD_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}
