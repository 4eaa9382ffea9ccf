use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::context::{InformeMetadata, PlaceholderContext};
use super::toc::TocEntry;
use crate::blocks::{Block, BlockType, ContentType, TemplateSchema};

/// Component instance of one informe, holding the schema frozen at creation
/// time and the data filled by the technician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponenteInforme {
    pub id: String,
    #[schema(value_type = String, example = "controller_info")]
    pub tipo_componente: ContentType,
    /// Position among siblings sharing a content type.
    #[serde(default)]
    pub orden: i32,
    pub schema_congelado: TemplateSchema,
    /// Values keyed by data-block key. May be partial or contain stale keys.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub datos: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etiqueta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_serie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
}

impl ComponenteInforme {
    /// Filled value for `key`; `null` when the technician has not filled it.
    pub fn value_for(&self, key: &str) -> Value {
        self.datos.get(key).cloned().unwrap_or(Value::Null)
    }

    /// `componente.*` entries overlaid on the global context for this
    /// component's blocks.
    pub fn placeholder_overlay(&self) -> PlaceholderContext {
        let mut overlay = PlaceholderContext::new();
        overlay.set("componente.etiqueta", self.etiqueta.clone());
        overlay.set("componente.numero_serie", self.numero_serie.clone());
        overlay.set("componente.modelo", self.modelo.clone());
        overlay.insert("componente.tipo", self.tipo_componente.as_str());
        overlay
    }
}

/// One maintenance report: outer template, component instances, metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Informe {
    pub document_schema: TemplateSchema,
    #[serde(default)]
    pub componentes: Vec<ComponenteInforme>,
    #[serde(default)]
    pub metadata: InformeMetadata,
}

/// Output unit of assembly. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssembledBlock {
    pub id: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "section_title")]
    pub block_type: BlockType,
    /// Placeholder-resolved configuration; chrome blocks also carry
    /// `_pageNumber` and `_totalPages`.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: Map<String, Value>,
    /// Filled value of a data-producing block. An unfilled block keeps an
    /// explicit `null`, distinct from an absent value.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    /// Component the block was injected from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl AssembledBlock {
    pub(crate) fn from_block(block: &Block, config: Map<String, Value>) -> Self {
        Self {
            id: block.id.clone(),
            block_type: block.block_type.clone(),
            config,
            value: block
                .block_type
                .is_data_producing()
                .then_some(Value::Null),
            component_id: None,
        }
    }

    pub fn page_number(&self) -> Option<u64> {
        self.config.get("_pageNumber").and_then(Value::as_u64)
    }

    pub fn total_pages(&self) -> Option<u64> {
        self.config.get("_totalPages").and_then(Value::as_u64)
    }
}

/// Assembled blocks with their derived table of contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssembledReport {
    pub blocks: Vec<AssembledBlock>,
    pub toc: Vec<TocEntry>,
    pub total_pages: u32,
}
