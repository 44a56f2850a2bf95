//! User repository backed by PostgreSQL through SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, UpdateMany,
};
use tracing::instrument;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::map_db_err;
use common::{AppError, AppResult};
use domain::{DomainError, Page, Pagination, User, UserSearchParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "User";

/// User repository trait for dependency injection.
///
/// `save` replaces the whole row, `update` only writes non-empty fields.
/// Both, and `delete`, report a missing row as `NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of users ordered by id, plus the total row count
    async fn list(&self, pagination: Pagination) -> AppResult<Page<User>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Exact-match filter on every field present in `params`
    async fn search(&self, params: &UserSearchParams, pagination: Pagination)
        -> AppResult<Page<User>>;

    async fn create(&self, user: &User) -> AppResult<()>;

    async fn save(&self, user: &User) -> AppResult<()>;

    async fn update(&self, user: &User) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        condition: Condition,
        pagination: Pagination,
    ) -> AppResult<Page<User>> {
        let paginator = UserEntity::find()
            .filter(condition)
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, pagination.limit());

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(pagination.page_index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(models.into_iter().map(User::from).collect(), total))
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

fn update_by_id(id: &str, active_model: ActiveModel) -> UpdateMany<UserEntity> {
    UserEntity::update_many()
        .set(active_model)
        .filter(user::Column::Id.eq(id))
}

/// Every column except the key and `created_at`.
fn replace_model(user: &User) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        email: Set(user.email().to_string()),
        custom_id: Set(user.custom_id().to_string()),
        name: Set(user.name().to_string()),
        external_email: Set(user.external_email().to_string()),
        period: Set(user.period().to_string()),
        is_enable: Set(user.is_enable()),
        password_hash: Set(user.password_hash().map(String::from)),
        created_at: NotSet,
        updated_at: Set(Some(chrono::Utc::now())),
        joined_at: Set(user.joined_at()),
    }
}

/// Empty strings are left untouched; `is_enable` is always written.
fn patch_model(user: &User) -> ActiveModel {
    let text = |value: &str| {
        if value.is_empty() {
            NotSet
        } else {
            Set(value.to_string())
        }
    };

    let mut active_model = ActiveModel {
        email: text(user.email()),
        custom_id: text(user.custom_id()),
        name: text(user.name()),
        external_email: text(user.external_email()),
        period: text(user.period()),
        is_enable: Set(user.is_enable()),
        updated_at: Set(Some(chrono::Utc::now())),
        ..Default::default()
    };
    if let Some(hash) = user.password_hash().filter(|h| !h.is_empty()) {
        active_model.password_hash = Set(Some(hash.to_string()));
    }
    if let Some(joined_at) = user.joined_at() {
        active_model.joined_at = Set(Some(joined_at));
    }
    active_model
}

fn search_condition(params: &UserSearchParams) -> AppResult<Condition> {
    let mut condition = Condition::all();

    let text_filters = [
        (user::Column::Id, &params.id),
        (user::Column::Email, &params.email),
        (user::Column::CustomId, &params.custom_id),
        (user::Column::Name, &params.name),
        (user::Column::ExternalEmail, &params.external_email),
        (user::Column::Period, &params.period),
    ];
    for (column, value) in text_filters {
        if let Some(value) = value {
            condition = condition.add(column.eq(value.as_str()));
        }
    }

    if let Some(is_enable) = params.is_enable()? {
        condition = condition.add(user::Column::IsEnable.eq(is_enable));
    }

    Ok(condition)
}

#[async_trait]
impl UserRepository for UserStore {
    #[instrument(skip(self))]
    async fn list(&self, pagination: Pagination) -> AppResult<Page<User>> {
        self.fetch_page(Condition::all(), pagination).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        params: &UserSearchParams,
        pagination: Pagination,
    ) -> AppResult<Page<User>> {
        let condition = search_condition(params)?;
        self.fetch_page(condition, pagination).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn create(&self, user: &User) -> AppResult<()> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(user.id().to_string()),
            email: Set(user.email().to_string()),
            custom_id: Set(user.custom_id().to_string()),
            name: Set(user.name().to_string()),
            external_email: Set(user.external_email().to_string()),
            period: Set(user.period().to_string()),
            is_enable: Set(user.is_enable()),
            password_hash: Set(user.password_hash().map(String::from)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            joined_at: Set(user.joined_at()),
        };

        UserEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn save(&self, user: &User) -> AppResult<()> {
        self.apply(user.id(), replace_model(user)).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn update(&self, user: &User) -> AppResult<()> {
        self.apply(user.id(), patch_model(user)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(AppError::from(DomainError::not_found(ENTITY)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::NewUser;
    use sea_orm::{DbBackend, MockDatabase, MockExecResult, QueryTrait};

    fn where_clause(params: &UserSearchParams) -> String {
        let sql = UserEntity::find()
            .filter(search_condition(params).unwrap())
            .build(DbBackend::Postgres)
            .to_string();
        sql.split(" WHERE ").nth(1).unwrap_or_default().to_string()
    }

    #[test]
    fn test_search_condition_skips_unset_fields() {
        let params = UserSearchParams {
            custom_id: Some("stud01".to_string()),
            is_enable: Some("false".to_string()),
            ..Default::default()
        };

        let clause = where_clause(&params);

        assert!(clause.contains(r#""users"."custom_id" = 'stud01'"#));
        assert!(clause.contains(r#""users"."is_enable""#));
        assert!(!clause.contains(r#""users"."email""#));
    }

    #[test]
    fn test_search_condition_keeps_empty_strings() {
        let params = UserSearchParams {
            period: Some(String::new()),
            ..Default::default()
        };

        assert!(where_clause(&params).contains(r#""users"."period" = ''"#));
    }

    #[test]
    fn test_search_condition_rejects_bad_flag() {
        let params = UserSearchParams {
            is_enable: Some("maybe".to_string()),
            ..Default::default()
        };

        let err = search_condition(&params).unwrap_err();
        assert!(matches!(
            err.domain(),
            Some(DomainError::InvalidSearchParams(_))
        ));
    }

    fn set_clause(active_model: ActiveModel) -> String {
        let sql = update_by_id("u-1", active_model)
            .build(DbBackend::Postgres)
            .to_string();
        let set = sql.split(" SET ").nth(1).unwrap_or_default();
        set.split(" WHERE ").next().unwrap_or_default().to_string()
    }

    fn sparse_user() -> User {
        User::new(NewUser {
            id: "u-1".to_string(),
            name: "Renamed".to_string(),
            is_enable: false,
            ..Default::default()
        })
    }

    fn exec_result(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[test]
    fn test_patch_writes_only_given_fields() {
        let clause = set_clause(patch_model(&sparse_user()));

        assert!(clause.contains(r#""name" = 'Renamed'"#));
        assert!(clause.contains(r#""is_enable""#));
        assert!(clause.contains(r#""updated_at""#));
        for untouched in [
            r#""email""#,
            r#""custom_id""#,
            r#""external_email""#,
            r#""period""#,
            r#""password_hash""#,
            r#""joined_at""#,
            r#""created_at""#,
        ] {
            assert!(!clause.contains(untouched), "{untouched} should not be set");
        }
    }

    #[test]
    fn test_replace_writes_every_column_but_key() {
        let clause = set_clause(replace_model(&sparse_user()));

        assert!(clause.contains(r#""email" = ''"#));
        assert!(clause.contains(r#""period" = ''"#));
        assert!(clause.contains(r#""password_hash" = NULL"#));
        assert!(!clause.contains(r#""id""#));
        assert!(!clause.contains(r#""created_at""#));
    }

    #[tokio::test]
    async fn test_writes_to_missing_row_are_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([exec_result(0), exec_result(0), exec_result(0)])
            .into_connection();
        let store = UserStore::new(db);
        let not_found = DomainError::NotFound("User".to_string());

        let err = store.save(&sparse_user()).await.unwrap_err();
        assert_eq!(err.domain(), Some(&not_found));
        let err = store.update(&sparse_user()).await.unwrap_err();
        assert_eq!(err.domain(), Some(&not_found));
        let err = store.delete("u-1").await.unwrap_err();
        assert_eq!(err.domain(), Some(&not_found));
    }

    #[tokio::test]
    async fn test_update_of_existing_row_succeeds() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([exec_result(1)])
            .into_connection();

        assert!(UserStore::new(db).update(&sparse_user()).await.is_ok());
    }
}
