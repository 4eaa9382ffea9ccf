use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod blocks;
pub mod config;
pub mod error;
pub mod informe;
pub mod registry;
pub mod report;
pub mod template;

pub use crate::config::ServerConfig;
pub use crate::registry::AppState;

use crate::report::SchemaIssue;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    /// Validation issues of a rejected template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SchemaIssue>,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            issues: Vec::new(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn with_issues(mut self, issues: Vec<SchemaIssue>) -> Self {
        self.issues = issues;
        self
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::template::routes::list_block_types,
        crate::template::routes::list_placeholders,
        crate::template::routes::validate_template,
        crate::template::routes::list_templates,
        crate::template::routes::get_template,
        crate::template::routes::save_template,
        crate::template::routes::delete_template,
        crate::template::routes::apply_command,
        crate::template::routes::freeze_component,
        crate::informe::routes::assemble_informe,
        crate::informe::routes::table_of_contents
    ),
    components(
        schemas(
            blocks::Block,
            blocks::TemplateSchema,
            blocks::PageConfig,
            blocks::Orientation,
            blocks::BlockCategory,
            blocks::BlockDescriptor,
            blocks::TocConfig,
            report::ComponenteInforme,
            report::AssembledBlock,
            report::TocEntry,
            report::InformeMetadata,
            report::context::IntervencionInfo,
            report::context::ClienteInfo,
            report::context::SistemaInfo,
            report::context::InformeInfo,
            report::SchemaIssue,
            report::ComponentMetadata,
            template::model::TemplateKind,
            template::model::DocumentTemplate,
            template::model::SaveTemplateRequest,
            template::model::ValidationReport,
            template::model::FreezeRequest,
            informe::model::AssembleRequest,
            informe::model::AssembleResponse,
            informe::model::TocRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Templates", description = "Template editing, validation and registry endpoints."),
        (name = "Informes", description = "Report assembly endpoints.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Routes mounted under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(template::routes::config)
        .configure(informe::routes::config);
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    let app_state = web::Data::new(AppState::new(&config));

    let prometheus = PrometheusMetricsBuilder::new("informes_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {e}"))?;

    let bind_address = config.bind_address();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(configure_api))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
