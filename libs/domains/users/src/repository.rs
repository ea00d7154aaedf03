use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
///
/// Implementations assign ids on insert and enforce case-insensitive
/// username uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID, or `UserError::NotFound`
    async fn find_by_id(&self, id: i32) -> UserResult<User>;

    /// Check if a username is taken, ignoring case
    async fn username_exists(&self, username: &str) -> UserResult<bool>;

    /// Insert a user in a single atomic step
    ///
    /// A taken username is reported as `UserError::DuplicateUsername`.
    async fn create(&self, user: NewUser) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    users: BTreeMap<i32, User>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Unicode lowercase comparison, matching the `LOWER(username)` unique index
fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> UserResult<User> {
        let store = self.store.read().await;
        store.users.get(&id).cloned().ok_or(UserError::NotFound(id.into()))
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .any(|u| same_username(&u.username, username)))
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        // Check and insert under the same write lock
        if store
            .users
            .values()
            .any(|u| same_username(&u.username, &input.username))
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        store.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: store.next_id,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            role: input.role,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }
}
