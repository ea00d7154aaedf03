//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError), so a bad
//! request renders the same HTML error page as every other failure.

pub mod form_fields;
pub mod id_path;

pub use form_fields::FormFields;
pub use id_path::IdPath;
