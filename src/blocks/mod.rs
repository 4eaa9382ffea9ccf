//! Block vocabulary shared by document and component templates.
//!
//! - `model` - block types, categories, content types and the schema record
//! - `config` - typed views over a block's open configuration map
//! - `defaults` - per-type default configuration and the editor palette
//! - `commands` - editing commands returning a new schema each time

pub mod commands;
pub mod config;
pub mod defaults;
pub mod model;

pub use commands::{apply, CommandError, SchemaCommand};
pub use config::{BlockConfig, TocConfig};
pub use defaults::{catalog, default_config, BlockDescriptor};
pub use model::{
    Block, BlockCategory, BlockType, ContentType, Orientation, PageConfig, TemplateSchema,
};
