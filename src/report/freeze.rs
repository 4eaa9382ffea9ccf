//! Snapshotting a component template into a component instance.

use serde::Deserialize;
use serde_json::Map;
use utoipa::ToSchema;

use super::model::ComponenteInforme;
use crate::blocks::{ContentType, TemplateSchema};

/// Identification of the serviced component, copied onto the instance.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentMetadata {
    #[schema(example = "Robot 1")]
    pub etiqueta: Option<String>,
    pub numero_serie: Option<String>,
    pub modelo: Option<String>,
}

/// New component instance owning a deep copy of `schema`. Later edits to
/// the template never reach the copy.
pub fn freeze(
    schema: &TemplateSchema,
    tipo_componente: ContentType,
    orden: i32,
    metadata: ComponentMetadata,
) -> ComponenteInforme {
    ComponenteInforme {
        id: uuid::Uuid::new_v4().to_string(),
        tipo_componente,
        orden,
        schema_congelado: schema.clone(),
        datos: Map::new(),
        etiqueta: metadata.etiqueta,
        numero_serie: metadata.numero_serie,
        modelo: metadata.modelo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{apply, BlockType, SchemaCommand};

    #[test]
    fn test_frozen_copy_ignores_later_template_edits() {
        let template = apply(
            &TemplateSchema::default(),
            &SchemaCommand::AddBlock {
                block_type: BlockType::Tristate,
                index: None,
            },
        )
        .unwrap();

        let frozen = freeze(
            &template,
            ContentType::CabinetControl,
            3,
            ComponentMetadata {
                etiqueta: Some("Armario A".into()),
                ..Default::default()
            },
        );

        let edited = apply(
            &template,
            &SchemaCommand::RemoveBlock {
                id: template.blocks[0].id.clone(),
            },
        )
        .unwrap();

        assert!(edited.blocks.is_empty());
        assert_eq!(frozen.schema_congelado.blocks.len(), 1);
        assert_eq!(frozen.orden, 3);
        assert_eq!(frozen.etiqueta.as_deref(), Some("Armario A"));
        assert!(frozen.datos.is_empty());
    }
}
