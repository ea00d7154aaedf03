use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_helpers::{FormFields, IdPath};
use std::sync::Arc;

use crate::error::UserResult;
use crate::repository::UserRepository;
use crate::service::{CreateOutcome, UserService};
use crate::views::UserViews;

/// Shared state of the user pages
pub struct UsersState<R: UserRepository> {
    pub service: UserService<R>,
    pub views: UserViews,
}

/// Create the users router with all page routes
pub fn router<R: UserRepository + 'static>(service: UserService<R>, views: UserViews) -> Router {
    let state = Arc::new(UsersState { service, views });

    Router::new()
        .route("/users", get(list_users))
        .route("/users/add", get(add_user))
        .route("/users/create", post(create_user))
        .route("/users/view/{id}", get(view_user))
        .with_state(state)
}

/// List all users
///
/// GET /users
async fn list_users<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
) -> UserResult<Html<String>> {
    let users = state.service.list_users().await?;
    Ok(Html(state.views.render_index(&users)?))
}

/// Empty creation form
///
/// GET /users/add
async fn add_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
) -> UserResult<Html<String>> {
    let form = state.service.new_form();
    Ok(Html(state.views.render_add(&form)?))
}

/// Validate and store a new user
///
/// POST /users/create
///
/// Redirects to the listing on success; otherwise re-renders the form with
/// 422 Unprocessable Entity.
async fn create_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    FormFields(fields): FormFields,
) -> UserResult<Response> {
    match state.service.create_user(&fields).await? {
        CreateOutcome::Created(user) => {
            tracing::debug!(user_id = user.id, "Redirecting to user list");
            Ok(Redirect::to("/users").into_response())
        }
        CreateOutcome::Invalid(form) => {
            let html = state.views.render_add(&form)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// Show one user
///
/// GET /users/view/{id}
async fn view_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    IdPath(id): IdPath<i64>,
) -> UserResult<Html<String>> {
    let user = state.service.get_user(id).await?;
    Ok(Html(state.views.render_view(&user)?))
}
