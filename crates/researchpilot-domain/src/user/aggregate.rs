use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Email;
use crate::shared::{DomainError, UserId};

const MAX_NAME_CHARS: usize = 255;
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Registration data with an already-hashed password.
#[derive(Debug, Clone)]
pub struct NewUser {
    email: Email,
    name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        email: Email,
        name: Option<String>,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            email,
            name: normalize_name(name)?,
            password_hash,
            created_at: now,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    email: Email,
    name: Option<String>,
    #[serde(skip_serializing)]
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        email: Email,
        name: Option<String>,
        password_hash: String,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            is_active,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active {
            Ok(())
        } else {
            Err(DomainError::Forbidden("User account is inactive".to_string()))
        }
    }

    pub fn rename(&mut self, name: Option<String>, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.name = normalize_name(name)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn change_email(&mut self, email: Email, now: DateTime<Utc>) {
        self.email = email;
        self.updated_at = now;
    }

    pub fn set_password_hash(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = now;
    }
}

/// Plain-text password policy, checked before hashing.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    Ok(())
}

fn normalize_name(name: Option<String>) -> Result<Option<String>, DomainError> {
    match name {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else if trimmed.chars().count() > MAX_NAME_CHARS {
                Err(DomainError::Validation(format!(
                    "Name must be at most {} characters",
                    MAX_NAME_CHARS
                )))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}
