use serde::Serialize;
use std::fmt;

use crate::shared::DomainError;

const MAX_EMAIL_CHARS: usize = 255;

/// An e-mail address, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_lowercase();

        if value.chars().count() > MAX_EMAIL_CHARS {
            return Err(DomainError::Validation(format!(
                "Email must be at most {} characters",
                MAX_EMAIL_CHARS
            )));
        }

        let invalid = || DomainError::Validation(format!("Invalid email address: {}", raw.trim()));

        let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
        if local.is_empty()
            || domain.contains('@')
            || value.chars().any(char::is_whitespace)
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || domain.contains("..")
        {
            return Err(invalid());
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
