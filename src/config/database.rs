//! Catalog database connection and table creation.
//!
//! The catalog lives in a `SQLite` database, in memory unless
//! `CATALOG_DATABASE_URL` points elsewhere. Tables are generated from the
//! entity definitions with `Schema::create_table_from_entity`, so the schema
//! always matches the Rust structs.

use crate::entities::CatalogEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Environment variable naming the catalog database.
pub const DATABASE_URL_ENV: &str = "CATALOG_DATABASE_URL";

/// Gets the catalog database URL, defaulting to an in-memory database.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var(DATABASE_URL_ENV).unwrap_or_else(|_| "sqlite::memory:".to_string())
}

/// Opens a connection to the given database URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the catalog table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut catalog_table = schema.create_table_from_entity(CatalogEntry);
    catalog_table.if_not_exists();

    db.execute(builder.build(&catalog_table)).await?;

    Ok(())
}
