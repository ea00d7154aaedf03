//! Raw URL-encoded form extractor.

use std::collections::HashMap;

use axum::{
    Form,
    extract::{FromRequest, Request},
};

use crate::errors::AppError;

/// Extractor for `application/x-www-form-urlencoded` bodies as a flat
/// `name -> value` map.
///
/// Binding and validation happen later against a declared field table, so
/// this extractor never fails on missing or unexpected fields. It only
/// rejects bodies that are not a form at all.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::FormFields;
///
/// async fn create(FormFields(fields): FormFields) -> String {
///     format!("{} fields submitted", fields.len())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormFields(pub HashMap<String, String>);

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await?;
        Ok(FormFields(fields))
    }
}
