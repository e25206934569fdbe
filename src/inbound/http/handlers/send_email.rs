use crate::{
    domain::{
        contact::{
            models::submission::{ContactRequest, Submission},
            ports::ContactService,
        },
        rate_limit::RateLimitDecision,
    },
    inbound::http::{client::client_identity, errors::AppError, SharedContactState},
};
use actix_web::{web, HttpRequest, HttpResponse};

#[derive(serde::Serialize)]
struct SendEmailResponse {
    message: &'static str,
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(request, contact_request, state),
    fields(client = tracing::field::Empty)
)]
pub async fn send_email<CS: ContactService>(
    request: HttpRequest,
    contact_request: web::Json<ContactRequest>,
    state: web::Data<SharedContactState<CS>>,
) -> Result<HttpResponse, AppError> {
    let client = client_identity(&request, state.trust_forwarded_for());
    tracing::Span::current().record("client", &tracing::field::display(&client));

    match state.rate_limiter().check(&client) {
        RateLimitDecision::Rejected { retry_after } => {
            tracing::info!(?retry_after, "Rate limit exceeded");
            return Err(AppError::RateLimited {
                client,
                retry_after,
            });
        }
        RateLimitDecision::Allowed { remaining, .. } => {
            tracing::debug!(remaining, "Request within rate limit");
        }
    }

    let submission = Submission::parse(contact_request.into_inner())?;

    state
        .contact_service()
        .relay_submission(submission)
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Failed to send email");
            e
        })?;

    Ok(HttpResponse::Ok().json(SendEmailResponse {
        message: "Email sent successfully",
    }))
}
