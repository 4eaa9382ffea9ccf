use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;

use crate::blocks::{catalog, BlockDescriptor, SchemaCommand, TemplateSchema};
use crate::error::ApiError;
use crate::report::{schema_tokens, validate_schema, ComponenteInforme, PLACEHOLDER_KEYS};
use crate::template::model::{DocumentTemplate, FreezeRequest, SaveTemplateRequest, ValidationReport};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/blocks",
    tag = "Templates",
    responses(
        (status = 200, description = "Block palette with default configuration", body = Vec<BlockDescriptor>)
    )
)]
pub async fn list_block_types() -> impl Responder {
    HttpResponse::Ok().json(catalog())
}

#[utoipa::path(
    get,
    path = "/api/placeholders",
    tag = "Templates",
    responses(
        (status = 200, description = "Placeholder keys available to templates")
    )
)]
pub async fn list_placeholders() -> impl Responder {
    HttpResponse::Ok().json(PLACEHOLDER_KEYS)
}

#[utoipa::path(
    post,
    path = "/api/templates/validate",
    tag = "Templates",
    request_body = TemplateSchema,
    responses(
        (status = 200, description = "Validation report", body = ValidationReport)
    )
)]
pub async fn validate_template(schema: web::Json<TemplateSchema>) -> impl Responder {
    HttpResponse::Ok().json(validation_report(&schema))
}

#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "Templates",
    responses(
        (status = 200, description = "All registered templates", body = Vec<DocumentTemplate>)
    )
)]
pub async fn list_templates(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.list_templates())
}

#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    tag = "Templates",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template found", body = DocumentTemplate),
        (status = 404, description = "Template not found")
    )
)]
pub async fn get_template(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let template = state.get_template(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(template))
}

#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    tag = "Templates",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    request_body = SaveTemplateRequest,
    responses(
        (status = 200, description = "Template stored", body = DocumentTemplate),
        (status = 422, description = "Template failed validation", body = crate::ErrorResponse)
    )
)]
pub async fn save_template(
    state: web::Data<AppState>,
    path: web::Path<String>,
    item: web::Json<SaveTemplateRequest>,
) -> Result<HttpResponse, ApiError> {
    let template = state
        .save_template(&path.into_inner(), item.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(template))
}

#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    tag = "Templates",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template removed"),
        (status = 404, description = "Template not found")
    )
)]
pub async fn delete_template(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.delete_template(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[utoipa::path(
    post,
    path = "/api/templates/{id}/commands",
    tag = "Templates",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Command applied and template stored", body = DocumentTemplate),
        (status = 400, description = "Command could not be applied"),
        (status = 404, description = "Template or block not found"),
        (status = 422, description = "Resulting template failed validation")
    )
)]
pub async fn apply_command(
    state: web::Data<AppState>,
    path: web::Path<String>,
    command: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let command: SchemaCommand = serde_json::from_value(command.into_inner())
        .map_err(|e| ApiError::BadRequest(format!("invalid command: {e}")))?;
    let template = state.apply_command(&path.into_inner(), &command).await?;
    Ok(HttpResponse::Ok().json(template))
}

#[utoipa::path(
    post,
    path = "/api/templates/{id}/freeze",
    tag = "Templates",
    params(
        ("id" = String, Path, description = "Component template ID")
    ),
    request_body = FreezeRequest,
    responses(
        (status = 200, description = "New component instance with a frozen schema", body = ComponenteInforme),
        (status = 400, description = "Template is not a component template"),
        (status = 404, description = "Template not found")
    )
)]
pub async fn freeze_component(
    state: web::Data<AppState>,
    path: web::Path<String>,
    item: web::Json<FreezeRequest>,
) -> Result<HttpResponse, ApiError> {
    let component = state
        .freeze_component(&path.into_inner(), item.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(component))
}

pub fn validation_report(schema: &TemplateSchema) -> ValidationReport {
    let issues = validate_schema(schema);
    ValidationReport {
        valid: issues.is_empty(),
        issues,
        placeholders: schema_tokens(schema),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/blocks").route(web::get().to(list_block_types)))
        .service(web::resource("/placeholders").route(web::get().to(list_placeholders)))
        .service(web::resource("/templates").route(web::get().to(list_templates)))
        .service(web::resource("/templates/validate").route(web::post().to(validate_template)))
        .service(
            web::resource("/templates/{id}")
                .route(web::get().to(get_template))
                .route(web::put().to(save_template))
                .route(web::delete().to(delete_template)),
        )
        .service(web::resource("/templates/{id}/commands").route(web::post().to(apply_command)))
        .service(web::resource("/templates/{id}/freeze").route(web::post().to(freeze_component)));
}
