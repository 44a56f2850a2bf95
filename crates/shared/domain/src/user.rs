//! User domain entity.

use chrono::{DateTime, Utc};

use crate::error::DomainResult;
use crate::value_objects::{CustomId, ExternalEmail, InternalEmail};

/// Fields needed to build a [`User`].
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub custom_id: String,
    pub name: String,
    pub external_email: String,
    pub period: String,
    pub is_enable: bool,
    pub password_hash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub joined_at: Option<DateTime<Utc>>,
}

/// Member account.
///
/// Immutable once built; an update constructs a new `User` and replaces the
/// stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: String,
    email: InternalEmail,
    custom_id: CustomId,
    name: String,
    external_email: ExternalEmail,
    period: String,
    is_enable: bool,
    password_hash: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    joined_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(params: NewUser) -> Self {
        Self {
            id: params.id,
            email: InternalEmail::new(params.email),
            custom_id: CustomId::new(params.custom_id),
            name: params.name,
            external_email: ExternalEmail::new(params.external_email),
            period: params.period,
            is_enable: params.is_enable,
            password_hash: params.password_hash,
            created_at: params.created_at,
            updated_at: params.updated_at,
            joined_at: params.joined_at,
        }
    }

    /// Check custom id, then internal email, then external email.
    ///
    /// Stops at the first failure so each rule reports its own error kind.
    pub fn validate(&self) -> DomainResult<()> {
        self.custom_id.validate()?;
        self.email.validate(&self.custom_id, &self.period)?;
        self.external_email.validate()?;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn custom_id(&self) -> &str {
        self.custom_id.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn external_email(&self) -> &str {
        self.external_email.as_str()
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn is_enable(&self) -> bool {
        self.is_enable
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn joined_at(&self) -> Option<DateTime<Utc>> {
        self.joined_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn params() -> NewUser {
        NewUser {
            id: "u-1".to_string(),
            email: "stud01@uniproject.jp".to_string(),
            custom_id: "stud01".to_string(),
            name: "Student".to_string(),
            external_email: "real@example.com".to_string(),
            period: "0".to_string(),
            is_enable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_user() {
        assert!(User::new(params()).validate().is_ok());
    }

    #[test]
    fn test_custom_id_checked_first() {
        let user = User::new(NewUser {
            custom_id: "--bad".to_string(),
            external_email: "broken".to_string(),
            ..params()
        });

        assert_eq!(user.validate(), Err(DomainError::InvalidCustomId));
    }

    #[test]
    fn test_email_checked_before_external_email() {
        let user = User::new(NewUser {
            period: "2024".to_string(),
            external_email: "broken".to_string(),
            ..params()
        });

        assert_eq!(user.validate(), Err(DomainError::InvalidEmail));
    }

    #[test]
    fn test_external_email_checked_last() {
        let user = User::new(NewUser {
            external_email: "broken".to_string(),
            ..params()
        });

        assert_eq!(user.validate(), Err(DomainError::InvalidExternalEmail));
    }

    #[test]
    fn test_accessors() {
        let user = User::new(NewUser {
            password_hash: Some("hash".to_string()),
            ..params()
        });

        assert_eq!(user.id(), "u-1");
        assert_eq!(user.custom_id(), "stud01");
        assert_eq!(user.password_hash(), Some("hash"));
        assert!(user.is_enable());
        assert!(user.joined_at().is_none());
    }
}
