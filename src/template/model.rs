use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blocks::TemplateSchema;
use crate::report::{ComponentMetadata, SchemaIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Outer report template holding content markers.
    Document,
    /// Per-component template, frozen into informes.
    Component,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Document => f.write_str("document"),
            TemplateKind::Component => f.write_str("component"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    #[schema(example = "plantilla-mantenimiento-robot")]
    pub id: String,
    pub tipo: TemplateKind,
    #[schema(example = "Informe de mantenimiento preventivo")]
    pub nombre: String,
    pub schema: TemplateSchema,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateRequest {
    pub tipo: TemplateKind,
    pub nombre: String,
    pub schema: TemplateSchema,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<SchemaIssue>,
    /// Placeholder keys used anywhere in the schema, first-seen order.
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FreezeRequest {
    #[schema(value_type = String, example = "cabinet_control")]
    pub tipo_componente: crate::blocks::ContentType,
    #[serde(default)]
    pub orden: i32,
    #[serde(flatten)]
    pub metadata: ComponentMetadata,
}
