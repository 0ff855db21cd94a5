use sea_orm::DatabaseConnection;

/// Shared application state: one connection pool opened at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
