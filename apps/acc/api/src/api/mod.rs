use axum::Router;

pub mod health;
pub mod users;

/// Creates the page routes.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> eyre::Result<Router> {
    Ok(Router::new().merge(users::router(state)?))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless page
/// router. The /ready endpoint checks the database connection when there is one.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
