//! Users Domain
//!
//! Server-rendered user management: list users, show a creation form,
//! validate and store submissions, view a single user.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP pages, Handlebars views
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Form binding, password encoding, creation flow
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, drafts, roles
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//!     views::UserViews,
//! };
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let views = UserViews::new().expect("templates are valid");
//!
//! let router = handlers::router(service, views);
//! ```

pub mod entity;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod views;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use form::{BoundForm, FieldError};
pub use models::{NewUser, Role, User, UserDraft};
pub use password::{Argon2PasswordEncoder, PasswordEncoder};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{CreateOutcome, UserService};
pub use views::UserViews;
