use axum::Router;
use domain_users::{InMemoryUserRepository, PgUserRepository, UserService, UserViews, handlers};

pub fn router(state: &crate::state::AppState) -> eyre::Result<Router> {
    let views = UserViews::new().map_err(|e| eyre::eyre!("Failed to build user views: {}", e))?;

    let router = match &state.db {
        Some(db) => {
            let repository = PgUserRepository::new(db.clone());
            handlers::router(UserService::new(repository), views)
        }
        None => {
            tracing::warn!("Using in-memory user storage; data is lost on restart");
            handlers::router(UserService::new(InMemoryUserRepository::new()), views)
        }
    };

    Ok(router)
}
