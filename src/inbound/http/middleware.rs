use crate::configuration::ApplicationSettings;
use crate::inbound::http::errors::AppError;
use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::middleware::DefaultHeaders;
use actix_web::{error::JsonPayloadError, web, HttpRequest};

const CORS_MAX_AGE_SECONDS: usize = 3600;

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add((
            "Strict-Transport-Security",
            "max-age=15552000; includeSubDomains",
        ))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
        .add((
            "Content-Security-Policy",
            "default-src 'none'; frame-ancestors 'self'",
        ))
}

/// `None` lets any origin post the form.
pub fn cors(allowed_origins: Option<&[String]>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::POST])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(CORS_MAX_AGE_SECONDS);

    match allowed_origins {
        None => cors.allow_any_origin(),
        Some(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

pub fn json_config(settings: &ApplicationSettings) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(settings.max_payload_bytes)
        .error_handler(json_error_handler)
}

fn json_error_handler(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    let reason = match &error {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid JSON: {}", e),
        _ => "Invalid request body".to_string(),
    };
    tracing::debug!(error = %error, "Rejected request body");
    AppError::MalformedBody(reason).into()
}
