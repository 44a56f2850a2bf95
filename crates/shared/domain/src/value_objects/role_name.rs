//! Role display name.

use crate::constants::{MAX_ROLE_NAME_LENGTH, MIN_ROLE_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length is counted in characters, not bytes.
    pub fn validate(&self) -> DomainResult<()> {
        let len = self.0.chars().count();
        if !(MIN_ROLE_NAME_LENGTH..=MAX_ROLE_NAME_LENGTH).contains(&len) {
            return Err(DomainError::InvalidRoleName(format!(
                "length {} outside {}..={}",
                len, MIN_ROLE_NAME_LENGTH, MAX_ROLE_NAME_LENGTH
            )));
        }

        if let Some(c) = self.0.chars().find(|c| is_blocked(*c)) {
            return Err(DomainError::InvalidRoleName(format!(
                "character U+{:04X} is not allowed",
                c as u32
            )));
        }

        Ok(())
    }
}

/// Control characters, C1/latin-1 padding, and the U+2000..U+2FFF symbol block.
fn is_blocked(c: char) -> bool {
    let cp = c as u32;
    cp < 0x20 || (0x7F..=0xA0).contains(&cp) || (0x2000..=0x2FFF).contains(&cp)
}
