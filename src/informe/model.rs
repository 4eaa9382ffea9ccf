use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blocks::{TemplateSchema, TocConfig};
use crate::report::{AssembledBlock, ComponenteInforme, InformeMetadata, TocEntry};

/// Assembly input. Exactly one of `documentTemplateId` and `documentSchema`
/// must be given.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssembleRequest {
    #[schema(example = "plantilla-mantenimiento-robot")]
    pub document_template_id: Option<String>,
    pub document_schema: Option<TemplateSchema>,
    #[serde(default)]
    pub componentes: Vec<ComponenteInforme>,
    #[serde(default)]
    pub metadata: InformeMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssembleResponse {
    pub blocks: Vec<AssembledBlock>,
    pub toc: Vec<TocEntry>,
    pub total_pages: u32,
    /// Placeholder keys referenced by the document template, first-seen order.
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TocRequest {
    pub blocks: Vec<AssembledBlock>,
    #[serde(default)]
    pub config: TocConfig,
}
