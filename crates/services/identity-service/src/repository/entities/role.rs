//! Role database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{NewRole, PermissionSet, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub custom_id: String,
    pub name: String,
    /// `Permission` bits reinterpreted as a signed integer
    pub permission: i32,
    pub is_enable: bool,
    pub is_system: bool,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Store a permission mask in the signed column without losing bit 31.
pub fn bits_to_column(bits: u32) -> i32 {
    bits as i32
}

impl From<Model> for Role {
    fn from(model: Model) -> Self {
        Role::new(NewRole {
            id: model.id,
            custom_id: model.custom_id,
            name: model.name,
            permissions: PermissionSet::from_bits(model.permission as u32),
            is_enable: model.is_enable,
            is_system: model.is_system,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_to_role_restores_names() {
        let model = Model {
            id: "r-1".to_string(),
            custom_id: "admin".to_string(),
            name: "Admin".to_string(),
            permission: bits_to_column((1 << 0) | (1 << 24)),
            is_enable: true,
            is_system: true,
            created_at: None,
            updated_at: None,
        };

        let role = Role::from(model);
        assert_eq!(role.permissions().names(), ["USER_READ", "ROLE_MANAGE"]);
        assert!(role.is_system());
    }
}
