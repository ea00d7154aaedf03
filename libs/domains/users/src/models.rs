use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{UserError, UserResult};

/// User roles
///
/// The stored value follows the `ROLE_*` convention; the form shows the
/// Spanish labels returned by [`Role::label`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Role {
    #[sea_orm(string_value = "ROLE_ADMIN")]
    #[serde(rename = "ROLE_ADMIN")]
    #[strum(serialize = "ROLE_ADMIN")]
    Admin,
    #[sea_orm(string_value = "ROLE_USER")]
    #[serde(rename = "ROLE_USER")]
    #[strum(serialize = "ROLE_USER")]
    User,
}

impl Role {
    /// Label shown in forms and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::User => "Usuario",
        }
    }
}

/// Persisted user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the repository on insert
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    /// Encoded password (never rendered)
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First and last name joined by a space, skipping missing parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Transient record the creation form binds into.
///
/// Holds the plaintext password until it is encoded; it never leaves the
/// request that created it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub is_active: bool,
}

/// Insert payload: a validated draft whose password has been encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub is_active: bool,
}

impl NewUser {
    /// Replace the draft's plaintext with `encoded_password`.
    ///
    /// Fails only if the draft skipped validation and has no role.
    pub fn from_draft(draft: UserDraft, encoded_password: String) -> UserResult<Self> {
        let role = draft.role.ok_or_else(|| {
            UserError::Internal("user draft reached persistence without a role".to_string())
        })?;

        Ok(Self {
            username: draft.username,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            password: encoded_password,
            role,
            is_active: draft.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_string_values() {
        assert_eq!(Role::Admin.to_string(), "ROLE_ADMIN");
        assert_eq!(Role::from_str("ROLE_USER").unwrap(), Role::User);
        assert!(Role::from_str("ROLE_ROOT").is_err());
        assert_eq!(Role::User.label(), "Usuario");
    }

    #[test]
    fn test_full_name_skips_missing_parts() {
        let now = Utc::now();
        let mut user = User {
            id: 1,
            username: "ana".into(),
            first_name: Some("Ana".into()),
            last_name: None,
            email: "ana@example.com".into(),
            password: "encoded".into(),
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.full_name(), "Ana");

        user.last_name = Some("García".into());
        assert_eq!(user.full_name(), "Ana García");
    }

    #[test]
    fn test_new_user_from_draft_swaps_password() {
        let draft = UserDraft {
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
            role: Some(Role::User),
            is_active: true,
            ..Default::default()
        };

        let new_user = NewUser::from_draft(draft, "$argon2id$encoded".into()).unwrap();
        assert_eq!(new_user.password, "$argon2id$encoded");
        assert_eq!(new_user.role, Role::User);
    }

    #[test]
    fn test_new_user_from_draft_requires_role() {
        let result = NewUser::from_draft(UserDraft::default(), "encoded".into());
        assert!(matches!(result, Err(UserError::Internal(_))));
    }
}
