//! Typed views over a block's open `config` map.
//!
//! Blocks keep their configuration as a JSON object so that placeholder
//! resolution can walk it generically and so that keys added by newer editors
//! survive a load/save cycle. Code that needs to reason about a specific
//! block type reads it through [`BlockConfig`] instead of poking at the map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::model::{Block, BlockType, ContentType};

#[derive(Debug, Clone, PartialEq)]
pub enum BlockConfig {
    /// Scalar data fields: text, textarea, number, date, checkbox, signature, tristate.
    Field(FieldConfig),
    Select(SelectConfig),
    Checklist(ChecklistConfig),
    Table(TableConfig),
    /// `header` and `section_title`.
    Heading(HeadingConfig),
    ContentMarker(ContentMarkerConfig),
    TableOfContents(TocConfig),
    /// Layout, pagination and page chrome; nothing typed to read.
    Presentation,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConfig {
    pub key: String,
    pub label: String,
    pub required: bool,
    pub help_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectConfig {
    pub field: FieldConfig,
    pub options: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistConfig {
    pub field: FieldConfig,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableConfig {
    pub field: FieldConfig,
    pub columns: Vec<Value>,
    pub fixed_rows: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingConfig {
    pub title: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentMarkerConfig {
    /// `None` when the block does not declare `contentType`.
    pub content_type: Option<ContentType>,
    pub title: Option<String>,
}

/// Configuration of a `table_of_contents` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TocConfig {
    pub title: String,
    /// Entries deeper than this level are left out.
    pub max_level: Option<u8>,
    pub show_page_numbers: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: "Índice".to_string(),
            max_level: None,
            show_page_numbers: true,
        }
    }
}

impl BlockConfig {
    pub fn from_block(block: &Block) -> Self {
        let config = &block.config;
        match &block.block_type {
            BlockType::TextField
            | BlockType::Textarea
            | BlockType::NumberField
            | BlockType::DateField
            | BlockType::Checkbox
            | BlockType::Signature
            | BlockType::Tristate => Self::Field(FieldConfig::read(config)),
            BlockType::SelectField => Self::Select(SelectConfig {
                field: FieldConfig::read(config),
                options: list(config, "options"),
            }),
            BlockType::Checklist => Self::Checklist(ChecklistConfig {
                field: FieldConfig::read(config),
                items: list(config, "items"),
            }),
            BlockType::Table => Self::Table(TableConfig {
                field: FieldConfig::read(config),
                columns: list(config, "columns"),
                fixed_rows: list(config, "fixedRows"),
            }),
            BlockType::Header | BlockType::SectionTitle => {
                Self::Heading(HeadingConfig::read(config))
            }
            BlockType::ComponentSection | BlockType::ContentPlaceholder => {
                Self::ContentMarker(ContentMarkerConfig {
                    content_type: text(config, "contentType").map(ContentType::from),
                    title: text(config, "title"),
                })
            }
            BlockType::TableOfContents => Self::TableOfContents(TocConfig::read(config)),
            BlockType::Unknown(_) => Self::Unknown,
            _ => Self::Presentation,
        }
    }

    /// The field part of any data-producing block.
    pub fn field(&self) -> Option<&FieldConfig> {
        match self {
            Self::Field(field) => Some(field),
            Self::Select(select) => Some(&select.field),
            Self::Checklist(checklist) => Some(&checklist.field),
            Self::Table(table) => Some(&table.field),
            _ => None,
        }
    }
}

impl FieldConfig {
    fn read(config: &Map<String, Value>) -> Self {
        Self {
            key: text(config, "key").unwrap_or_default(),
            label: text(config, "label").unwrap_or_default(),
            required: config
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            help_text: text(config, "helpText"),
        }
    }
}

impl HeadingConfig {
    /// Also used on assembled blocks, whose config is already resolved.
    pub fn read(config: &Map<String, Value>) -> Self {
        Self {
            title: text(config, "title").unwrap_or_default(),
            level: level(config),
        }
    }
}

impl TocConfig {
    pub fn read(config: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            title: text(config, "title").unwrap_or(defaults.title),
            max_level: config
                .get("maxLevel")
                .and_then(Value::as_u64)
                .map(|value| value.min(u64::from(u8::MAX)) as u8),
            show_page_numbers: config
                .get("showPageNumbers")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.show_page_numbers),
        }
    }
}

fn text(config: &Map<String, Value>, name: &str) -> Option<String> {
    config.get(name).and_then(Value::as_str).map(str::to_string)
}

fn list(config: &Map<String, Value>, name: &str) -> Vec<Value> {
    config
        .get(name)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Heading level, default 1. Accepts numbers and numeric strings.
fn level(config: &Map<String, Value>) -> u8 {
    let raw = match config.get("level") {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    match raw {
        Some(value) if value >= 1 => value.min(u64::from(u8::MAX)) as u8,
        _ => 1,
    }
}
