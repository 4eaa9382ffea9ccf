//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use informes_server::blocks::{Block, BlockType, ContentType, TemplateSchema};
use informes_server::report::ComponenteInforme;
use serde_json::{json, Map, Value};

pub fn block(id: &str, block_type: BlockType, config: Value) -> Block {
    let config = match config {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Block::with_config(id, block_type, config)
}

pub fn title(id: &str, text: &str, level: u8) -> Block {
    block(
        id,
        BlockType::SectionTitle,
        json!({ "title": text, "level": level }),
    )
}

pub fn marker(id: &str, content_type: &str) -> Block {
    block(
        id,
        BlockType::ContentPlaceholder,
        json!({ "contentType": content_type }),
    )
}

pub fn text_field(id: &str, key: &str) -> Block {
    block(
        id,
        BlockType::TextField,
        json!({ "key": key, "label": key, "required": false }),
    )
}

pub fn component(id: &str, tipo: ContentType, orden: i32, blocks: Vec<Block>) -> ComponenteInforme {
    ComponenteInforme {
        id: id.to_string(),
        tipo_componente: tipo,
        orden,
        schema_congelado: TemplateSchema::new(blocks),
        datos: Map::new(),
        etiqueta: None,
        numero_serie: None,
        modelo: None,
    }
}

/// Outer report: cover, intro, one marker per component family, closing text.
pub fn maintenance_document() -> TemplateSchema {
    TemplateSchema::new(vec![
        block(
            "cover",
            BlockType::CoverHeader,
            json!({ "title": "{{intervencion.titulo}}", "subtitle": "{{cliente.nombre}}" }),
        ),
        block("toc", BlockType::TableOfContents, json!({ "title": "Índice" })),
        block("sep-1", BlockType::SectionSeparator, json!({})),
        title("intro", "Introducción", 1),
        marker("m-controller", "controller_info"),
        marker("m-cabinet", "cabinet_control"),
        block("brk", BlockType::PageBreak, json!({})),
        title("closing", "Conclusiones", 1),
        block(
            "footer",
            BlockType::PageFooter,
            json!({ "text": "{{cliente.nombre}}" }),
        ),
    ])
}

/// Component schema with a heading carrying the component label and two fields.
pub fn controller_component(id: &str, orden: i32, etiqueta: &str) -> ComponenteInforme {
    let mut component = component(
        id,
        ContentType::ControllerInfo,
        orden,
        vec![
            title(
                &format!("{id}-title"),
                "Control de {{componente.etiqueta}}",
                2,
            ),
            text_field(&format!("{id}-serial"), "serial"),
            text_field(&format!("{id}-notes"), "notes"),
        ],
    );
    component.etiqueta = Some(etiqueta.to_string());
    component
}
