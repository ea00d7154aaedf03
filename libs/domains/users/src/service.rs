use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::form::{self, ALREADY_USED, BoundForm, USER_FORM};
use crate::models::{NewUser, User, UserDraft};
use crate::password::{Argon2PasswordEncoder, PasswordEncoder};
use crate::repository::UserRepository;

/// Result of a creation attempt that did not fail outright.
#[derive(Debug)]
pub enum CreateOutcome {
    /// The user was stored
    Created(User),
    /// The submission was rejected; re-render the form
    Invalid(BoundForm),
}

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            encoder: Arc::clone(&self.encoder),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    /// Service with the default Argon2id encoder
    pub fn new(repository: R) -> Self {
        Self::with_encoder(repository, Argon2PasswordEncoder::default())
    }

    pub fn with_encoder(repository: R, encoder: impl PasswordEncoder + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
            encoder: Arc::new(encoder),
        }
    }

    /// All users, oldest first
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Get a user by ID
    ///
    /// Ids outside the `i32` range of the id column cannot exist and are
    /// reported as `NotFound`.
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        let id = i32::try_from(id).map_err(|_| UserError::NotFound(id))?;
        self.repository.find_by_id(id).await
    }

    /// Empty form for the creation page
    pub fn new_form(&self) -> BoundForm {
        BoundForm::default()
    }

    /// Validate a submission and store the user it describes.
    ///
    /// Validation problems, including a taken username, come back as
    /// [`CreateOutcome::Invalid`]. Only encoder and storage failures are
    /// errors.
    pub async fn create_user(&self, input: &HashMap<String, String>) -> UserResult<CreateOutcome> {
        let mut draft = UserDraft::default();
        let mut form = form::bind(USER_FORM, input, &mut draft);

        if !form.is_valid() {
            tracing::info!(errors = form.errors().len(), "User submission failed validation");
            return Ok(CreateOutcome::Invalid(form));
        }

        if self.repository.username_exists(&draft.username).await? {
            tracing::info!(username = %draft.username, "Username already taken");
            form.add_error("username", ALREADY_USED);
            return Ok(CreateOutcome::Invalid(form));
        }

        let encoded = self.encoder.encode(&draft, &draft.password)?;
        let new_user = NewUser::from_draft(draft, encoded)?;

        match self.repository.create(new_user).await {
            Ok(user) => Ok(CreateOutcome::Created(user)),
            Err(UserError::DuplicateUsername(username)) => {
                tracing::warn!(%username, "Username taken by a concurrent request");
                form.add_error("username", ALREADY_USED);
                Ok(CreateOutcome::Invalid(form))
            }
            Err(e) => Err(e),
        }
    }
}
