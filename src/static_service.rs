use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::config::APP_CONFIG;

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect once and hand out the process-wide connection. All
/// repositories read the static directly; call this during startup
/// before any of them run.
pub async fn get_database_connection() -> &'static DatabaseConnection {
    if let Some(conn) = DATABASE_CONNECTION.get() {
        return conn;
    }

    let mut options = ConnectOptions::new(APP_CONFIG.database_url.clone());
    options
        .max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let connection = Database::connect(options)
        .await
        .expect("Failed to connect to database");

    DATABASE_CONNECTION
        .set(connection)
        .ok();

    DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set")
}
