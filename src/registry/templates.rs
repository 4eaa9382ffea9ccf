//! Template registry operations

use chrono::Utc;

use super::AppState;
use crate::blocks::{apply, SchemaCommand, TemplateSchema};
use crate::error::ApiError;
use crate::report::{freeze, validate_schema, ComponenteInforme, SchemaIssues};
use crate::template::model::{DocumentTemplate, FreezeRequest, SaveTemplateRequest, TemplateKind};

impl AppState {
    /// Cached template, falling back to the store on a miss.
    pub async fn get_template(&self, id: &str) -> Result<DocumentTemplate, ApiError> {
        if let Some(template) = self.template_cache.get(id).await {
            return Ok(template);
        }

        let stored = self.store.read().get(id).cloned();
        match stored {
            Some(template) => {
                log::debug!("Template {} not cached, loaded from store", id);
                self.template_cache
                    .insert(id.to_string(), template.clone())
                    .await;
                Ok(template)
            }
            None => Err(ApiError::TemplateNotFound(id.to_string())),
        }
    }

    /// All templates, sorted by id.
    pub fn list_templates(&self) -> Vec<DocumentTemplate> {
        let mut templates: Vec<DocumentTemplate> = self.store.read().values().cloned().collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates
    }

    /// Validate and store a template, replacing any previous version.
    pub async fn save_template(
        &self,
        id: &str,
        request: SaveTemplateRequest,
    ) -> Result<DocumentTemplate, ApiError> {
        self.commit(id, request.tipo, request.nombre, request.schema)
            .await
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), ApiError> {
        let removed = self.store.write().remove(id);
        self.template_cache.invalidate(id).await;
        match removed {
            Some(_) => {
                log::info!("Template {} removed from registry", id);
                Ok(())
            }
            None => Err(ApiError::TemplateNotFound(id.to_string())),
        }
    }

    /// Apply an editing command and store the result if it still validates.
    pub async fn apply_command(
        &self,
        id: &str,
        command: &SchemaCommand,
    ) -> Result<DocumentTemplate, ApiError> {
        let current = self.get_template(id).await?;
        let schema = apply(&current.schema, command)?;
        self.commit(id, current.tipo, current.nombre, schema).await
    }

    /// Freeze a registered component template into a new component instance.
    pub async fn freeze_component(
        &self,
        id: &str,
        request: FreezeRequest,
    ) -> Result<ComponenteInforme, ApiError> {
        let template = self.get_template(id).await?;
        if template.tipo != TemplateKind::Component {
            return Err(ApiError::WrongTemplateKind {
                id: id.to_string(),
                expected: TemplateKind::Component,
                actual: template.tipo,
            });
        }

        let component = freeze(
            &template.schema,
            request.tipo_componente,
            request.orden,
            request.metadata,
        );
        log::info!(
            "Froze template {} into component {} ({})",
            id,
            component.id,
            component.tipo_componente
        );
        Ok(component)
    }

    /// Schema of a registered document template.
    pub async fn document_schema(&self, id: &str) -> Result<TemplateSchema, ApiError> {
        let template = self.get_template(id).await?;
        if template.tipo != TemplateKind::Document {
            return Err(ApiError::WrongTemplateKind {
                id: id.to_string(),
                expected: TemplateKind::Document,
                actual: template.tipo,
            });
        }
        Ok(template.schema)
    }

    async fn commit(
        &self,
        id: &str,
        tipo: TemplateKind,
        nombre: String,
        schema: TemplateSchema,
    ) -> Result<DocumentTemplate, ApiError> {
        SchemaIssues::from(validate_schema(&schema))
            .into_result()
            .map_err(|issues| {
                log::warn!(
                    "Refusing to store template {}: {} validation issue(s)",
                    id,
                    issues.len()
                );
                ApiError::InvalidTemplate(issues)
            })?;

        let template = DocumentTemplate {
            id: id.to_string(),
            tipo,
            nombre,
            schema,
            updated_at: Utc::now(),
        };
        self.store
            .write()
            .insert(id.to_string(), template.clone());
        self.template_cache
            .insert(id.to_string(), template.clone())
            .await;
        log::info!(
            "Template {} stored with {} blocks",
            id,
            template.schema.blocks.len()
        );
        Ok(template)
    }
}
