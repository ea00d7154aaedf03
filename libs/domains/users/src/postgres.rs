use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, QueryOrder, SqlErr,
    Statement,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> UserResult<User> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or(UserError::NotFound(id.into()))
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        // Same expression as the idx_users_username_lower unique index
        let existing = entity::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"SELECT * FROM "users" WHERE LOWER("username") = $1 LIMIT 1"#,
                [username.to_lowercase().into()],
            ))
            .one(&self.db)
            .await?;

        Ok(existing.is_some())
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let username = input.username.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, username))?;

        tracing::info!(user_id = model.id, username = %model.username, "Created user");
        Ok(model.into())
    }
}

/// Unique violations (the username index) become `DuplicateUsername`.
fn map_insert_error(error: DbErr, username: String) -> UserError {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!(%username, %detail, "Username lost insert race");
            UserError::DuplicateUsername(username)
        }
        _ => UserError::Database(error),
    }
}
