use core::time::Duration;
use std::{collections::HashMap, fmt, str::FromStr as _, sync::Arc};

use anyhow::{Context as _, Result, anyhow};
use chrono::{DateTime, Utc};
use log::{debug, info};
use models::{Version, VersionId, VersionMetadata};
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    config::database_config::DatabaseConfig,
    errors::{TrackerError, not_found_error, storage_error},
    registry::DocumentId,
};

pub mod models;

pub type Transaction<'a> = sqlx::Transaction<'a, Sqlite>;

const SELECT_VERSION: &str = r"
    select
        id,
        rule_id as document_id,
        captured_at,
        rule_text as text,
        change_summary as label
    from rule_versions
";

const SELECT_VERSION_METADATA: &str = r"
    select
        id,
        rule_id as document_id,
        captured_at,
        length(rule_text) as text_length,
        change_summary as label
    from rule_versions
";

/// Append-only store of document versions.
///
/// Reads go straight to the pool. Writes to a document run while holding
/// that document's in-process lock and an immediate SQLite transaction.
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
    document_locks: Arc<Mutex<HashMap<DocumentId, Arc<Mutex<()>>>>>,
}

impl Database {
    pub async fn try_new(config: &DatabaseConfig) -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str(&config.sqlite_url)
            .with_context(|| format!("Invalid sqlite url: {}", config.sqlite_url))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_seconds))
            .journal_mode(SqliteJournalMode::Wal);

        if let Some(parent) = connection_options
            .get_filename()
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .test_before_acquire(true)
            .connect_with(connection_options)
            .await
            .with_context(|| format!("Cannot open database at {}", config.sqlite_url))?;

        Self::run_migrations(&pool).await?;
        info!("Opened version store at {}", config.sqlite_url);

        Ok(Self {
            pool,
            document_locks: Arc::default(),
        })
    }

    async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
        sqlx::migrate!("src/app_state/database/migrations")
            .run(pool)
            .await
            .context("Cannot check for pending migrations")
    }

    async fn lock_document(&self, document_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.document_locks.lock().await;
            locks.entry(document_id.to_owned()).or_default().clone()
        };

        lock.lock_owned().await
    }

    pub async fn create_write_transaction(&self) -> Result<Transaction<'static>> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .context("Cannot create transaction")?;

        // sqlx doesn't support immediate transactions for sqlite: https://github.com/launchbadge/sqlx/issues/481
        sqlx::query("END; BEGIN IMMEDIATE;")
            .execute(&mut *transaction)
            .await
            .context("Cannot upgrade to a write transaction")?;

        Ok(transaction)
    }

    /// Opens the critical section for writing a document: no other
    /// ingestion of the same document can start until the returned value is
    /// committed or dropped.
    pub async fn begin_ingestion(&self, document_id: &str) -> Result<IngestionTransaction> {
        let guard = self.lock_document(document_id).await;
        let transaction = self.create_write_transaction().await?;

        Ok(IngestionTransaction {
            database: self.clone(),
            document_id: document_id.to_owned(),
            transaction,
            _guard: guard,
        })
    }

    pub async fn latest(
        &self,
        document_id: &str,
        transaction: Option<&mut Transaction<'_>>,
    ) -> Result<Option<Version>> {
        let sql = format!(
            "{SELECT_VERSION} where rule_id = ? order by captured_at desc, id desc limit 1"
        );
        let query = sqlx::query_as::<_, Version>(&sql).bind(document_id);

        if let Some(transaction) = transaction {
            query.fetch_optional(&mut **transaction).await
        } else {
            query.fetch_optional(&self.pool).await
        }
        .with_context(|| format!("Cannot fetch latest version of rule `{document_id}`"))
    }

    /// Appends a version outside of an ingestion, for callers that already
    /// decided to store the text.
    pub async fn append(&self, document_id: &str, text: &str, label: &str) -> Result<Version> {
        let mut ingestion = self.begin_ingestion(document_id).await?;
        let version = ingestion.append(text, label).await?;
        ingestion.commit().await?;

        Ok(version)
    }

    async fn insert_version(
        &self,
        document_id: &str,
        captured_at: DateTime<Utc>,
        text: &str,
        label: &str,
        transaction: &mut Transaction<'_>,
    ) -> Result<Version> {
        let id: VersionId = sqlx::query(
            r"
            insert into rule_versions (rule_id, captured_at, rule_text, change_summary)
            values (?, ?, ?, ?)
            ",
        )
        .bind(document_id)
        .bind(captured_at)
        .bind(text)
        .bind(label)
        .execute(&mut **transaction)
        .await
        .with_context(|| format!("Cannot insert version of rule `{document_id}`"))?
        .last_insert_rowid();

        debug!("Stored version {id} of rule `{document_id}` ({label})");

        Ok(Version {
            id,
            document_id: document_id.to_owned(),
            captured_at,
            text: text.to_owned(),
            label: label.to_owned(),
        })
    }

    /// Metadata of every version of the document, newest first.
    pub async fn history(&self, document_id: &str) -> Result<Vec<VersionMetadata>> {
        let sql = format!(
            "{SELECT_VERSION_METADATA} where rule_id = ? order by captured_at desc, id desc"
        );

        sqlx::query_as::<_, VersionMetadata>(&sql)
            .bind(document_id)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Cannot fetch history of rule `{document_id}`"))
    }

    pub async fn find_version(&self, version_id: VersionId) -> Result<Option<Version>> {
        let sql = format!("{SELECT_VERSION} where id = ?");

        sqlx::query_as::<_, Version>(&sql)
            .bind(version_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Cannot fetch version `{version_id}`"))
    }

    pub async fn version(&self, version_id: VersionId) -> Result<Version, TrackerError> {
        self.find_version(version_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| not_found_error(anyhow!("Version `{version_id}` not found")))
    }

    pub async fn text_of(&self, version_id: VersionId) -> Result<String, TrackerError> {
        self.version(version_id).await.map(|version| version.text)
    }

    /// Deletes every version of the document and returns how many were
    /// removed. This is the only operation that removes versions.
    pub async fn reset_history(&self, document_id: &str) -> Result<u64> {
        let _guard = self.lock_document(document_id).await;
        let mut transaction = self.create_write_transaction().await?;

        let deleted = sqlx::query("delete from rule_versions where rule_id = ?")
            .bind(document_id)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Cannot reset history of rule `{document_id}`"))?
            .rows_affected();

        transaction
            .commit()
            .await
            .context("Failed to commit successful transaction")?;

        info!("Deleted {deleted} versions of rule `{document_id}`");

        Ok(deleted)
    }
}

/// A write transaction scoped to one document. Rolled back on drop unless
/// committed.
pub struct IngestionTransaction {
    database: Database,
    document_id: DocumentId,
    transaction: Transaction<'static>,
    _guard: OwnedMutexGuard<()>,
}

impl IngestionTransaction {
    pub fn document_id(&self) -> &str { &self.document_id }

    pub async fn latest(&mut self) -> Result<Option<Version>> {
        self.database
            .latest(&self.document_id, Some(&mut self.transaction))
            .await
    }

    /// The new version is never timestamped before the current latest one.
    pub async fn append(&mut self, text: &str, label: &str) -> Result<Version> {
        let now = Utc::now();
        let captured_at = self
            .latest()
            .await?
            .map_or(now, |latest| latest.captured_at.max(now));

        self.database
            .insert_version(
                &self.document_id,
                captured_at,
                text,
                label,
                &mut self.transaction,
            )
            .await
    }

    pub async fn commit(self) -> Result<()> {
        self.transaction
            .commit()
            .await
            .context("Failed to commit successful transaction")
    }
}

impl fmt::Debug for IngestionTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionTransaction")
            .field("document_id", &self.document_id)
            .finish_non_exhaustive()
    }
}
