use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Open the visitor store and bring its schema up to date.
///
/// `SQLite` URLs get a single pooled connection so background visit writes
/// queue instead of tripping over the database lock.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or a migration fails.
pub async fn connect(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let is_sqlite = database_url.starts_with("sqlite:");

    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(if is_sqlite { 1 } else { 10 })
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    tracing::info!(sqlite = is_sqlite, "Database connected");

    Migrator::up(&db, None).await?;
    tracing::info!("Migrations applied");

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn test_connect_creates_visitor_table() {
        let db = connect("sqlite::memory:").await;
        assert!(db.is_ok());

        if let Ok(db) = db {
            let backend = db.get_database_backend();
            let count = db
                .query_one(Statement::from_string(
                    backend,
                    "SELECT COUNT(*) AS n FROM visitor",
                ))
                .await;
            assert!(count.is_ok());
        }
    }
}
