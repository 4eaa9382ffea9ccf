//! Service-level errors and their HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::blocks::CommandError;
use crate::report::SchemaIssues;
use crate::template::model::TemplateKind;
use crate::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("template '{0}' not found")]
    TemplateNotFound(String),
    #[error("{}", .0.summary())]
    InvalidTemplate(SchemaIssues),
    #[error("template '{id}' is a {actual} template, expected a {expected} template")]
    WrongTemplateKind {
        id: String,
        expected: TemplateKind,
        actual: TemplateKind,
    },
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("{0}")]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTemplate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Command(CommandError::BlockNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::WrongTemplateKind { .. }
            | ApiError::Command(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let body = match self {
            ApiError::TemplateNotFound(_) | ApiError::Command(CommandError::BlockNotFound(_)) => {
                ErrorResponse::not_found(&message)
            }
            ApiError::InvalidTemplate(issues) => {
                ErrorResponse::new("InvalidTemplate", &message)
                    .with_issues(issues.iter().cloned().collect())
            }
            _ => ErrorResponse::bad_request(&message),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
