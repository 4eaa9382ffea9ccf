//! Report assembly engine.
//!
//! Takes a document template, the component schemas frozen for one informe
//! and the data filled per component, and produces the ordered, page-numbered
//! block sequence handed to the renderer:
//! - `placeholder` - `{{namespace.field}}` resolution over strings and JSON
//! - `context` - the placeholder context and the informe metadata feeding it
//! - `router` - which component blocks land under which content marker
//! - `engine` - the assembly pass and page numbering
//! - `toc` - table of contents projected from assembled blocks
//! - `validation` - structural checks run before a template is saved
//! - `freeze` - snapshotting component templates into informe instances

pub mod context;
pub mod engine;
pub mod freeze;
pub mod model;
pub mod placeholder;
pub mod router;
pub mod toc;
pub mod validation;

pub use context::{InformeMetadata, PlaceholderContext, PLACEHOLDER_KEYS};
pub use engine::{assemble, assemble_report, page_count};
pub use freeze::{freeze, ComponentMetadata};
pub use model::{AssembledBlock, AssembledReport, ComponenteInforme, Informe};
pub use placeholder::{extract_tokens, extract_tree_tokens, resolve, resolve_tree, schema_tokens};
pub use router::route;
pub use toc::{project_toc, TocEntry};
pub use validation::{validate_schema, SchemaIssue, SchemaIssues};
