use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum FullNameError {
    #[error("Full name is required")]
    EmptyOrWhitespace,
    #[error(
        "Full name is too long (maximum allowed is {} characters)",
        FullName::MAX_LENGTH
    )]
    TooLong,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FullName(String);

impl FullName {
    pub const MAX_LENGTH: usize = 256;

    /// Returns the trimmed name if it is non-empty and no longer than
    /// `MAX_LENGTH` graphemes.
    pub fn parse(s: &str) -> Result<FullName, FullNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FullNameError::EmptyOrWhitespace);
        }
        if trimmed.graphemes(true).count() > FullName::MAX_LENGTH {
            return Err(FullNameError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
