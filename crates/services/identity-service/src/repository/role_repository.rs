//! Role repository backed by PostgreSQL through SeaORM.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, UpdateMany,
};
use tracing::instrument;

use super::entities::role::{self, bits_to_column, ActiveModel, Entity as RoleEntity};
use super::entities::user_role::{self, Entity as UserRoleEntity};
use super::map_db_err;
use common::AppResult;
use domain::{DomainError, Page, Pagination, Role, RoleSearchParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "Role";
const ASSIGNMENT: &str = "Role assignment";

/// Role repository trait for dependency injection.
///
/// `is_system` is written only on create; `save` and `update` leave it alone.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list(&self, pagination: Pagination) -> AppResult<Page<Role>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Role>>;

    async fn search(&self, params: &RoleSearchParams, pagination: Pagination)
        -> AppResult<Page<Role>>;

    async fn create(&self, role: &Role) -> AppResult<()>;

    async fn save(&self, role: &Role) -> AppResult<()>;

    async fn update(&self, role: &Role) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Roles assigned to a user, ordered by id
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Role>>;

    /// Assigning a role the user already holds is a no-op
    async fn assign_to_user(&self, user_id: &str, role_id: &str) -> AppResult<()>;

    /// `NotFound` when the user does not hold the role
    async fn revoke_from_user(&self, user_id: &str, role_id: &str) -> AppResult<()>;
}

/// Concrete implementation of RoleRepository
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        condition: Condition,
        pagination: Pagination,
    ) -> AppResult<Page<Role>> {
        let paginator = RoleEntity::find()
            .filter(condition)
            .order_by_asc(role::Column::Id)
            .paginate(&self.db, pagination.limit());

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(pagination.page_index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(models.into_iter().map(Role::from).collect(), total))
    }

    async fn apply(&self, id: &str, active_model: ActiveModel) -> AppResult<()> {
        let result = update_by_id(id, active_model)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY).into());
        }
        Ok(())
    }
}

fn update_by_id(id: &str, active_model: ActiveModel) -> UpdateMany<RoleEntity> {
    RoleEntity::update_many()
        .set(active_model)
        .filter(role::Column::Id.eq(id))
}

/// Every column except the key, `is_system` and `created_at`.
fn replace_model(role: &Role) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        custom_id: Set(role.custom_id().to_string()),
        name: Set(role.name().to_string()),
        permission: Set(bits_to_column(role.permission_bits())),
        is_enable: Set(role.is_enable()),
        is_system: NotSet,
        created_at: NotSet,
        updated_at: Set(Some(chrono::Utc::now())),
    }
}

/// Empty strings and an empty permission list are left untouched.
fn patch_model(role: &Role) -> ActiveModel {
    let mut active_model = ActiveModel {
        is_enable: Set(role.is_enable()),
        updated_at: Set(Some(chrono::Utc::now())),
        ..Default::default()
    };

    if !role.custom_id().is_empty() {
        active_model.custom_id = Set(role.custom_id().to_string());
    }
    if !role.name().is_empty() {
        active_model.name = Set(role.name().to_string());
    }
    if !role.permissions().names().is_empty() {
        active_model.permission = Set(bits_to_column(role.permission_bits()));
    }
    active_model
}

fn search_condition(params: &RoleSearchParams) -> AppResult<Condition> {
    let mut condition = Condition::all();

    let text_filters = [
        (role::Column::Id, &params.id),
        (role::Column::CustomId, &params.custom_id),
        (role::Column::Name, &params.name),
    ];
    for (column, value) in text_filters {
        if let Some(value) = value {
            condition = condition.add(column.eq(value.as_str()));
        }
    }

    if let Some(is_enable) = params.is_enable()? {
        condition = condition.add(role::Column::IsEnable.eq(is_enable));
    }
    if let Some(is_system) = params.is_system()? {
        condition = condition.add(role::Column::IsSystem.eq(is_system));
    }

    Ok(condition)
}

#[async_trait]
impl RoleRepository for RoleStore {
    #[instrument(skip(self))]
    async fn list(&self, pagination: Pagination) -> AppResult<Page<Role>> {
        self.fetch_page(Condition::all(), pagination).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Role>> {
        let result = RoleEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        params: &RoleSearchParams,
        pagination: Pagination,
    ) -> AppResult<Page<Role>> {
        let condition = search_condition(params)?;
        self.fetch_page(condition, pagination).await
    }

    #[instrument(skip(self, role), fields(role_id = %role.id()))]
    async fn create(&self, role: &Role) -> AppResult<()> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(role.id().to_string()),
            custom_id: Set(role.custom_id().to_string()),
            name: Set(role.name().to_string()),
            permission: Set(bits_to_column(role.permission_bits())),
            is_enable: Set(role.is_enable()),
            is_system: Set(role.is_system()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        RoleEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    #[instrument(skip(self, role), fields(role_id = %role.id()))]
    async fn save(&self, role: &Role) -> AppResult<()> {
        self.apply(role.id(), replace_model(role)).await
    }

    #[instrument(skip(self, role), fields(role_id = %role.id()))]
    async fn update(&self, role: &Role) -> AppResult<()> {
        self.apply(role.id(), patch_model(role)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = RoleEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY).into());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Role>> {
        let role_ids: Vec<String> = UserRoleEntity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|assignment| assignment.role_id)
            .collect();

        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = RoleEntity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    async fn assign_to_user(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        let active_model = user_role::ActiveModel {
            user_id: Set(user_id.to_string()),
            role_id: Set(role_id.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
        };

        UserRoleEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_from_user(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        let result = UserRoleEntity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ASSIGNMENT).into());
        }
        Ok(())
    }
}
