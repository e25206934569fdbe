use validator::validate_email;

/// Address of whoever filled in the contact form.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: &str) -> Result<ContactEmail, EmailError> {
        if validate_email(s) && has_top_level_domain(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(EmailError::Invalid)
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The domain must end in an alphabetic (or punycode) label of two or more
/// characters, which rules out `jane@localhost` and IP literals.
fn has_top_level_domain(address: &str) -> bool {
    let Some((_, domain)) = address.rsplit_once('@') else {
        return false;
    };
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let is_punycode = tld
        .get(..4)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("xn--"));
    tld.chars().count() >= 2 && (tld.chars().all(char::is_alphabetic) || is_punycode)
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    // The rejected input is not echoed, the message ends up in responses.
    #[error("Valid email is required")]
    Invalid,
}
