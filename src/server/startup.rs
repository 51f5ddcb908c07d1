use crate::server::{
    config::Config,
    data::{progress_store::ProgressStore, quest_catalog::QuestCatalogRepository},
    error::AppError,
    service::quest::QuestLedger,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations so the points,
/// daily, invite, tier and shop tables exist before the bot handles its first event.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the quest ledger over the configured catalog and progress documents.
///
/// Writes the default catalog when none exists, then loads the progress store once so
/// a corrupt document stops startup instead of failing every later event.
///
/// # Arguments
/// - `config` - Application configuration containing the document paths and quest settings
///
/// # Returns
/// - `Ok(QuestLedger)` - Ledger ready to ingest events
/// - `Err(AppError)` - Failed to write the default catalog or read the progress store
pub async fn init_quest_ledger(config: &Config) -> Result<QuestLedger, AppError> {
    let catalog = QuestCatalogRepository::new(&config.quest_catalog_path);
    catalog.ensure_default().await?;

    let quest_count = catalog.load().await?.len();
    tracing::info!(
        "Loaded {} quests from {}",
        quest_count,
        catalog.path().display()
    );

    let store = ProgressStore::json_file(&config.quest_progress_path);
    store.get().await?;

    Ok(QuestLedger::new(store, catalog, config.quest_settings))
}
