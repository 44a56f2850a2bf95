//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{NewUser, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub custom_id: String,
    pub name: String,
    pub external_email: String,
    pub period: String,
    pub is_enable: bool,
    pub password_hash: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
    pub joined_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User::new(NewUser {
            id: model.id,
            email: model.email,
            custom_id: model.custom_id,
            name: model.name,
            external_email: model.external_email,
            period: model.period,
            is_enable: model.is_enable,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
            joined_at: model.joined_at,
        })
    }
}
