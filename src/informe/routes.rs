use actix_web::{web, HttpResponse, Responder};

use crate::error::ApiError;
use crate::informe::model::{AssembleRequest, AssembleResponse, TocRequest};
use crate::report::{assemble_report, project_toc, schema_tokens, Informe, TocEntry};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/informes/assemble",
    tag = "Informes",
    request_body = AssembleRequest,
    responses(
        (status = 200, description = "Assembled, page-numbered block sequence", body = AssembleResponse),
        (status = 400, description = "Missing or ambiguous document template", body = crate::ErrorResponse),
        (status = 404, description = "Document template not found", body = crate::ErrorResponse)
    )
)]
pub async fn assemble_informe(
    state: web::Data<AppState>,
    item: web::Json<AssembleRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = item.into_inner();
    let document_schema = match (request.document_template_id, request.document_schema) {
        (Some(id), None) => state.document_schema(&id).await?,
        (None, Some(schema)) => schema,
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "give either documentTemplateId or documentSchema, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "documentTemplateId or documentSchema is required".to_string(),
            ))
        }
    };

    let informe = Informe {
        document_schema,
        componentes: request.componentes,
        metadata: request.metadata,
    };
    let placeholders = schema_tokens(&informe.document_schema);
    let report = assemble_report(&informe);

    log::info!(
        "Assembled informe with {} components into {} blocks over {} pages",
        informe.componentes.len(),
        report.blocks.len(),
        report.total_pages
    );

    Ok(HttpResponse::Ok().json(AssembleResponse {
        blocks: report.blocks,
        toc: report.toc,
        total_pages: report.total_pages,
        placeholders,
    }))
}

#[utoipa::path(
    post,
    path = "/api/informes/toc",
    tag = "Informes",
    request_body = TocRequest,
    responses(
        (status = 200, description = "Table of contents entries", body = Vec<TocEntry>)
    )
)]
pub async fn table_of_contents(item: web::Json<TocRequest>) -> impl Responder {
    let request = item.into_inner();
    HttpResponse::Ok().json(project_toc(&request.blocks, &request.config))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/informes/assemble").route(web::post().to(assemble_informe)))
        .service(web::resource("/informes/toc").route(web::post().to(table_of_contents)));
}
