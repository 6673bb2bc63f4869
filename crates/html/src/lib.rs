//! Tolerant HTML tag scanner.
//!
//! [`scan`] walks markup once and reports tags, attributes, text, and comments to a
//! [`TagSink`]. It never fails: wrappers are synthesized, stray end tags dropped, and
//! unterminated constructs end the scan with a balanced stream and a [`Truncation`].
//!
//! ```
//! let (doc, report) = html::parse_document("<title>Hi</title><p>one<p>two");
//! assert!(report.truncated.is_none());
//! assert_eq!(html::extract_head_metadata(&doc).title.as_deref(), Some("Hi"));
//! ```

pub mod attributes;
pub mod boundary;
pub mod config;
pub mod entities;
pub mod error;
pub mod head;
pub mod outline;
pub mod perf_fixtures;
pub mod phase;
pub mod rawtext;
pub mod rules;
pub mod scanner;
pub mod sink;
pub mod tree;

mod cursor;
mod entity_table;
mod stack;

pub use crate::attributes::{Attribute, parse_attributes};
pub use crate::config::ScannerConfig;
pub use crate::entities::{decode_entities, lookup_entity};
pub use crate::error::{Error, Result};
pub use crate::head::{HeadMetadata, LinkTag, MetaTag, extract_head_metadata};
pub use crate::outline::outline;
pub use crate::phase::DocumentPhase;
pub use crate::rawtext::RawTextKind;
pub use crate::scanner::{ScanReport, Scanner, Truncation, TruncationKind, scan, scan_bytes};
pub use crate::sink::{Event, EventLog, TagSink};
pub use crate::tree::{Id, Node, NodeId, TreeSink, parse_document, parse_document_with};
