use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Password encoding error: {0}")]
    PasswordEncoding(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::DuplicateUsername(username) => {
                AppError::Conflict(format!("Username '{}' is already taken", username))
            }
            UserError::Database(e) => AppError::Database(e),
            UserError::PasswordEncoding(msg) => {
                AppError::InternalServerError(format!("Password encoding failed: {}", msg))
            }
            UserError::Template(msg) => {
                AppError::InternalServerError(format!("Template rendering failed: {}", msg))
            }
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = UserError::NotFound(99).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_password_encoding_maps_to_500() {
        let response = UserError::PasswordEncoding("bad params".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_error_keeps_status_mapping() {
        let error = AppError::from(UserError::Database(DbErr::RecordNotFound("users".into())));
        assert_eq!(error.status_and_code().0, StatusCode::NOT_FOUND);
    }
}
