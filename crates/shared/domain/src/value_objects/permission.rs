//! Permission bitflags attached to roles.
//!
//! Bit layout:
//! - 0-7: user management
//! - 8-15: app (OAuth2 client) management
//! - 16-23: system and configuration
//! - 24-31: RBAC and security
//!
//! Roles are written with permission names and stored as the `u32` mask.

use bitflags::bitflags;

use crate::error::{DomainError, DomainResult};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permission: u32 {
        const USER_READ         = 1 << 0;
        const USER_CREATE       = 1 << 1;
        const USER_UPDATE       = 1 << 2;
        const USER_DELETE       = 1 << 3;
        const USER_DISABLE      = 1 << 4;

        const APP_READ          = 1 << 8;
        const APP_CREATE        = 1 << 9;
        const APP_UPDATE        = 1 << 10;
        const APP_DELETE        = 1 << 11;
        const APP_SECRET_ROTATE = 1 << 12;

        const TOKEN_REVOKE      = 1 << 16;
        const AUDIT_READ        = 1 << 18;
        const CONFIG_UPDATE     = 1 << 19;
        const KEY_MANAGE        = 1 << 20;

        const ROLE_MANAGE       = 1 << 24;
        const PERMISSION_MANAGE = 1 << 25;
        const SESSION_MANAGE    = 1 << 26;
        const MFA_MANAGE        = 1 << 27;
    }
}

impl Permission {
    /// Names of every flag set in `self`, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_string()).collect()
    }

    /// Readable form of a raw mask. Bits without a flag come out as
    /// `PERMISSION_<index>` after the named ones.
    pub fn describe(bits: u32) -> Vec<String> {
        let known = Self::from_bits_truncate(bits);
        let unknown = bits & !known.bits();

        let mut text = known.names();
        text.extend(
            (0..u32::BITS)
                .filter(|i| unknown & (1 << i) != 0)
                .map(|i| format!("PERMISSION_{}", i)),
        );
        text
    }
}

/// Permission names as submitted, paired with the mask they resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionSet {
    names: Vec<String>,
    bits: u32,
}

impl PermissionSet {
    /// Build from names without checking them; call `validate` before persisting.
    pub fn new(names: Vec<String>) -> Self {
        let bits = names
            .iter()
            .filter_map(|n| Permission::from_name(n))
            .fold(Permission::empty(), |acc, p| acc | p)
            .bits();
        Self { names, bits }
    }

    /// Build from names, rejecting the first unknown one.
    pub fn from_names(names: Vec<String>) -> DomainResult<Self> {
        let set = Self::new(names);
        set.validate()?;
        Ok(set)
    }

    /// Rebuild from a stored mask. Unknown bits stay in the mask but get no name.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            names: Permission::from_bits_truncate(bits).names(),
            bits,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        match self.names.iter().find(|n| Permission::from_name(n).is_none()) {
            Some(unknown) => Err(DomainError::InvalidPermission(unknown.clone())),
            None => Ok(()),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn permission(&self) -> Permission {
        Permission::from_bits_truncate(self.bits)
    }
}
