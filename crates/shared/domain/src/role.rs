//! Role domain entity.

use chrono::{DateTime, Utc};

use crate::error::DomainResult;
use crate::value_objects::{CustomId, PermissionSet, RoleName};

/// Fields needed to build a [`Role`].
#[derive(Debug, Clone, Default)]
pub struct NewRole {
    pub id: String,
    pub custom_id: String,
    pub name: String,
    pub permissions: PermissionSet,
    pub is_enable: bool,
    pub is_system: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Named bundle of permissions. System roles are built in and cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: String,
    custom_id: CustomId,
    name: RoleName,
    permissions: PermissionSet,
    is_enable: bool,
    is_system: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn new(params: NewRole) -> Self {
        Self {
            id: params.id,
            custom_id: CustomId::new(params.custom_id),
            name: RoleName::new(params.name),
            permissions: params.permissions,
            is_enable: params.is_enable,
            is_system: params.is_system,
            created_at: params.created_at,
            updated_at: params.updated_at,
        }
    }

    /// Check custom id, then name, then permission names.
    pub fn validate(&self) -> DomainResult<()> {
        self.custom_id.validate()?;
        self.name.validate()?;
        self.permissions.validate()?;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn custom_id(&self) -> &str {
        self.custom_id.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn permission_bits(&self) -> u32 {
        self.permissions.bits()
    }

    pub fn is_enable(&self) -> bool {
        self.is_enable
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn params() -> NewRole {
        NewRole {
            id: "r-1".to_string(),
            custom_id: "staff".to_string(),
            name: "Staff".to_string(),
            permissions: PermissionSet::new(vec!["USER_READ".to_string()]),
            is_enable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_role() {
        let role = Role::new(params());
        assert!(role.validate().is_ok());
        assert_eq!(role.permission_bits(), 1);
    }

    #[test]
    fn test_rejects_bad_custom_id() {
        let role = Role::new(NewRole {
            custom_id: "staff_".to_string(),
            ..params()
        });
        assert_eq!(role.validate(), Err(DomainError::InvalidCustomId));
    }

    #[test]
    fn test_rejects_bad_name() {
        let role = Role::new(NewRole {
            name: String::new(),
            ..params()
        });
        assert!(matches!(role.validate(), Err(DomainError::InvalidRoleName(_))));
    }

    #[test]
    fn test_rejects_unknown_permission() {
        let role = Role::new(NewRole {
            permissions: PermissionSet::new(vec!["ROOT".to_string()]),
            ..params()
        });
        assert_eq!(
            role.validate(),
            Err(DomainError::InvalidPermission("ROOT".to_string()))
        );
    }
}
