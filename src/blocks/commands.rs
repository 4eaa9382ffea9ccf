//! Editing commands over an immutable [`TemplateSchema`].
//!
//! Every command takes the current schema by reference and returns a new one.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{Block, BlockType, PageConfig, TemplateSchema};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SchemaCommand {
    /// Insert a new block with default configuration; appends when `index` is absent.
    AddBlock {
        #[serde(rename = "type")]
        block_type: BlockType,
        #[serde(default)]
        index: Option<usize>,
    },
    RemoveBlock {
        id: String,
    },
    MoveBlock {
        id: String,
        #[serde(rename = "toIndex")]
        to_index: usize,
    },
    /// Shallow merge into `config`; a `null` value removes the key.
    UpdateConfig {
        id: String,
        patch: Map<String, Value>,
    },
    SetPageConfig {
        #[serde(rename = "pageConfig")]
        page_config: PageConfig,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("block '{0}' not found")]
    BlockNotFound(String),
    #[error("index {index} is out of range for a schema with {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },
}

pub fn apply(schema: &TemplateSchema, command: &SchemaCommand) -> Result<TemplateSchema, CommandError> {
    let mut next = schema.clone();

    match command {
        SchemaCommand::AddBlock { block_type, index } => {
            let len = next.blocks.len();
            let index = index.unwrap_or(len);
            if index > len {
                return Err(CommandError::IndexOutOfRange { index, len });
            }
            let mut block = Block::new(block_type.clone());
            if let Some(key) = block.data_key() {
                let key = unique_key(&next, key);
                block.config.insert("key".to_string(), Value::String(key));
            }
            next.blocks.insert(index, block);
        }
        SchemaCommand::RemoveBlock { id } => {
            let position = find(&next, id)?;
            next.blocks.remove(position);
        }
        SchemaCommand::MoveBlock { id, to_index } => {
            let position = find(&next, id)?;
            let len = next.blocks.len();
            if *to_index >= len {
                return Err(CommandError::IndexOutOfRange {
                    index: *to_index,
                    len,
                });
            }
            let block = next.blocks.remove(position);
            next.blocks.insert(*to_index, block);
        }
        SchemaCommand::UpdateConfig { id, patch } => {
            let position = find(&next, id)?;
            let config = &mut next.blocks[position].config;
            for (key, value) in patch {
                if value.is_null() {
                    config.remove(key);
                } else {
                    config.insert(key.clone(), value.clone());
                }
            }
        }
        SchemaCommand::SetPageConfig { page_config } => {
            next.page_config = page_config.clone();
        }
    }

    Ok(next)
}

fn find(schema: &TemplateSchema, id: &str) -> Result<usize, CommandError> {
    schema
        .position(id)
        .ok_or_else(|| CommandError::BlockNotFound(id.to_string()))
}

/// `base`, or `base_2`, `base_3`, ... whichever is not yet used in the schema.
fn unique_key(schema: &TemplateSchema, base: &str) -> String {
    let used = schema.data_keys();
    if !used.contains(&base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !used.contains(&candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
