use super::email::ContactEmail;
use super::message::MessageBody;
use super::name::FullName;
use crate::utils::error_chain_fmt;

/// Contact form as posted by the browser. Missing fields deserialize to
/// `None` and are reported like empty ones.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FullName,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FullName => "fullName",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, error: impl std::error::Error) -> Self {
        Self {
            field,
            message: error.to_string(),
        }
    }
}

#[derive(thiserror::Error)]
#[error("{} contact form field(s) failed validation", .0.len())]
pub struct InvalidSubmission(pub Vec<FieldError>);

impl InvalidSubmission {
    pub fn field_errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl std::fmt::Debug for InvalidSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)?;
        for error in &self.0 {
            writeln!(f, "\t{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// A contact form that passed validation. Only these ever reach the relay.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub full_name: FullName,
    pub email: ContactEmail,
    pub message: MessageBody,
}

impl Submission {
    /// Validates every field and collects all failures, in form order,
    /// rather than stopping at the first one.
    pub fn parse(request: ContactRequest) -> Result<Submission, InvalidSubmission> {
        let mut errors = Vec::new();

        let full_name = FullName::parse(request.full_name.as_deref().unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new(ContactField::FullName, e)))
            .ok();
        let email = ContactEmail::parse(request.email.as_deref().unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new(ContactField::Email, e)))
            .ok();
        let message = MessageBody::parse(request.message.as_deref().unwrap_or_default())
            .map_err(|e| errors.push(FieldError::new(ContactField::Message, e)))
            .ok();

        match (full_name, email, message) {
            (Some(full_name), Some(email), Some(message)) => Ok(Self {
                full_name,
                email,
                message,
            }),
            _ => Err(InvalidSubmission(errors)),
        }
    }
}
