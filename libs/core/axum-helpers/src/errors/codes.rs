use serde::{Deserialize, Serialize};

/// Error codes attached to every error page and error log line.
///
/// Integer codes are grouped in ranges:
/// - 1000-1999: Client errors
/// - 2000-2999: Database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// Path parameter could not be parsed
    InvalidPath,
    /// Request body could not be decoded as a form
    InvalidForm,
    /// Requested page or record does not exist
    NotFound,
    /// Unexpected server-side failure
    InternalError,
    /// Route exists but not for this HTTP method
    MethodNotAllowed,
    /// Record conflicts with an existing one
    Conflict,

    // Database errors (2000s)
    DatabaseNotFound,
    DatabaseConnection,
    DatabaseError,
    DatabaseUnhandled,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier shown on error pages.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPath => "INVALID_PATH",
            Self::InvalidForm => "INVALID_FORM",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Conflict => "CONFLICT",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
        }
    }

    /// Integer code for structured logs.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::InvalidPath.code(), 1002);
    /// assert_eq!(ErrorCode::DatabaseError.code(), 2003);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::InvalidPath => 1002,
            Self::InvalidForm => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MethodNotAllowed => 1006,
            Self::Conflict => 1008,

            // Database errors (2000-2999)
            Self::DatabaseNotFound => 2001,
            Self::DatabaseConnection => 2002,
            Self::DatabaseError => 2003,
            Self::DatabaseUnhandled => 2099,
        }
    }

    /// Message shown when the caller has nothing more specific to say.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidPath => "The address contains an invalid value",
            Self::InvalidForm => "The submitted form could not be read",
            Self::NotFound => "The requested page was not found",
            Self::InternalError => "An internal server error occurred",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this page",
            Self::Conflict => "Resource already exists",
            Self::DatabaseNotFound => "Database record not found",
            Self::DatabaseConnection => "Database is not reachable",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseUnhandled => "Unhandled database error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
