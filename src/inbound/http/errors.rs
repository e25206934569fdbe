use crate::domain::contact::models::submission::InvalidSubmission;
use crate::domain::contact::ports::ContactServiceError;
use crate::utils::error_chain_fmt;

use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to send email";

#[derive(thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] InvalidSubmission),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Rate limit exceeded for {client}")]
    RateLimited { client: String, retry_after: Duration },
    #[error("Failed to send email")]
    RelayError(#[from] ContactServiceError),
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct ErrorEntry<'a> {
    field: &'a str,
    message: &'a str,
}

#[derive(serde::Serialize)]
struct ValidationErrorBody<'a> {
    errors: Vec<ErrorEntry<'a>>,
}

#[derive(serde::Serialize)]
struct RelayErrorBody {
    error: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::RelayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(invalid) => {
                let errors = invalid
                    .field_errors()
                    .iter()
                    .map(|e| ErrorEntry {
                        field: e.field.as_str(),
                        message: &e.message,
                    })
                    .collect();
                HttpResponse::BadRequest().json(ValidationErrorBody { errors })
            }
            AppError::MalformedBody(reason) => {
                HttpResponse::BadRequest().json(ValidationErrorBody {
                    errors: vec![ErrorEntry {
                        field: "body",
                        message: reason,
                    }],
                })
            }
            AppError::RateLimited { retry_after, .. } => HttpResponse::TooManyRequests()
                .insert_header((
                    header::RETRY_AFTER,
                    retry_after_seconds(*retry_after).to_string(),
                ))
                .content_type(ContentType::plaintext())
                .body(RATE_LIMIT_MESSAGE),
            // Details stay in the logs, they may mention the relay or its credentials.
            AppError::RelayError(_) => {
                HttpResponse::InternalServerError().json(RelayErrorBody {
                    error: RELAY_FAILURE_MESSAGE,
                })
            }
        }
    }
}

fn retry_after_seconds(retry_after: Duration) -> u64 {
    let seconds = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 {
        seconds + 1
    } else {
        seconds
    }
}
