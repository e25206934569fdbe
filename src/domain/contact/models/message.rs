use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum MessageBodyError {
    #[error("Message is required")]
    EmptyOrWhitespace,
    #[error(
        "Message is too long (maximum allowed is {} characters)",
        MessageBody::MAX_LENGTH
    )]
    TooLong,
}

/// Free-text part of a contact submission.
#[derive(Debug, PartialEq, Clone)]
pub struct MessageBody(String);

impl MessageBody {
    pub const MAX_LENGTH: usize = 5000;

    pub fn parse(s: &str) -> Result<MessageBody, MessageBodyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MessageBodyError::EmptyOrWhitespace);
        }
        if trimmed.graphemes(true).count() > MessageBody::MAX_LENGTH {
            return Err(MessageBodyError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
