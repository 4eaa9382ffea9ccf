//! Default configuration per block type.
//!
//! Applied exactly once, when a block is created. Nothing downstream
//! re-derives defaults from missing keys.

use serde::Serialize;
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use super::model::{BlockCategory, BlockType};

pub fn default_config(block_type: &BlockType) -> Map<String, Value> {
    let value = match block_type {
        BlockType::Header => json!({ "title": "Título", "color": "#1f3864", "level": 1 }),
        BlockType::SectionTitle => json!({ "title": "Nueva sección", "level": 1 }),
        BlockType::StaticText => json!({ "text": "", "align": "left" }),
        BlockType::Divider => json!({ "style": "solid", "color": "#cccccc" }),
        BlockType::Spacer => json!({ "height": 12 }),
        BlockType::Image => json!({ "src": "", "width": "full", "align": "center" }),
        BlockType::TableOfContents => json!({ "title": "Índice", "showPageNumbers": true }),
        BlockType::PageBreak => json!({}),
        BlockType::SectionSeparator => json!({ "title": "" }),
        BlockType::CoverHeader => json!({
            "title": "{{intervencion.titulo}}",
            "subtitle": "{{cliente.nombre}}",
            "showLogo": true
        }),
        BlockType::PageHeader => json!({ "title": "{{informe.numero}}", "showPageNumber": false }),
        BlockType::PageFooter => json!({ "text": "{{cliente.nombre}}", "showPageNumber": true }),
        BlockType::BackCover => json!({ "text": "" }),
        BlockType::ComponentSection => json!({ "title": "", "contentType": "controller_info" }),
        BlockType::ContentPlaceholder => json!({ "title": "", "contentType": "all" }),
        BlockType::TextField => field("texto", "Texto", json!({ "placeholder": "" })),
        BlockType::Textarea => field("observaciones", "Observaciones", json!({ "rows": 4 })),
        BlockType::NumberField => field("valor", "Valor", json!({ "unit": "" })),
        BlockType::DateField => field("fecha", "Fecha", json!({})),
        BlockType::SelectField => field(
            "seleccion",
            "Selección",
            json!({ "options": ["Opción 1", "Opción 2"] }),
        ),
        BlockType::Checkbox => field("confirmado", "Confirmado", json!({})),
        BlockType::Signature => field("firma", "Firma", json!({})),
        BlockType::Table => field(
            "tabla",
            "Tabla",
            json!({
                "columns": [{ "key": "descripcion", "label": "Descripción" }],
                "fixedRows": [],
                "allowAddRows": true
            }),
        ),
        BlockType::Checklist => field(
            "verificaciones",
            "Verificaciones",
            json!({ "items": ["Elemento 1"] }),
        ),
        BlockType::Tristate => field(
            "punto_inspeccion",
            "Punto de inspección",
            json!({ "labels": { "ok": "OK", "nok": "NOK", "na": "N/A" } }),
        ),
        BlockType::Unknown(_) => json!({}),
    };

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Universal data-field keys merged with the type-specific extras.
fn field(key: &str, label: &str, extra: Value) -> Value {
    let mut base = json!({
        "key": key,
        "label": label,
        "required": false,
        "width": "full",
        "align": "left",
        "helpText": ""
    });
    if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
        base.extend(extra);
    }
    base
}

/// Palette entry served to the editor.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    #[serde(rename = "type")]
    pub block_type: String,
    pub category: BlockCategory,
    pub data_producing: bool,
    #[schema(value_type = Object)]
    pub default_config: Map<String, Value>,
}

pub fn catalog() -> Vec<BlockDescriptor> {
    BlockType::KNOWN
        .iter()
        .map(|block_type| BlockDescriptor {
            block_type: block_type.as_str().to_string(),
            category: block_type.category(),
            data_producing: block_type.is_data_producing(),
            default_config: default_config(block_type),
        })
        .collect()
}
