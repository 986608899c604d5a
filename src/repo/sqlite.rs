use crate::models::backup_record::BackupRecord;
use crate::models::config::is_in_memory;
use crate::models::error::{Result, StatusError};
use crate::repo::StatusStore;
use log::{debug, info};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, Row, TransactionBehavior};

type DbPool = Pool<SqliteConnectionManager>;

const RECORD_COLUMNS: &str = "id, hostname, mountpoint, backedup, \"ignore\"";

/// SQLite-backed store, cheap to clone (the pool is shared).
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(db_file: &str) -> Result<Self> {
        if db_file.is_empty() {
            return Err(StatusError::InvalidSetting(
                "Database file path cannot be empty. Provide a valid path or use ':memory:' for in-memory database.".to_string()
            ));
        }

        info!("Initializing database connection pool: {}", db_file);

        let in_memory = is_in_memory(db_file);
        let use_wal = !in_memory;

        let manager = SqliteConnectionManager::file(db_file).with_init(move |conn| {
            let mut pragmas = String::from(
                "PRAGMA busy_timeout = 5000;
                 PRAGMA synchronous = NORMAL;",
            );

            if use_wal {
                pragmas.push_str(" PRAGMA journal_mode = WAL;");
            }

            conn.execute_batch(&pragmas)
        });

        // Every ":memory:" connection is its own database, so keep exactly one
        // connection alive for the lifetime of the pool.
        let builder = if in_memory {
            Pool::<SqliteConnectionManager>::builder()
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            // Pool size: num_physical_cpus + 7 for good mix of reads/writes
            Pool::<SqliteConnectionManager>::builder()
                .max_size(num_cpus::get_physical() as u32 + 7)
        };

        let pool = builder
            .build(manager)
            .map_err(|cause| StatusError::DatabasePool {
                path: db_file.to_string(),
                cause,
            })?;

        info!("Database pool created with {} connections", pool.max_size());
        Ok(Self { pool })
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Create the `backup` table if it does not exist yet. Tables created by
    /// earlier deployments share the same column names and are left as-is.
    pub fn setup_database(&self) -> Result<()> {
        info!("Initializing database schema");
        let setup_queries = "BEGIN;
    PRAGMA ENCODING = 'UTF-8';

    CREATE TABLE IF NOT EXISTS backup(
        id            integer not null
            constraint backup_id_pk
                primary key autoincrement,
        hostname      VARCHAR(200),
        mountpoint    VARCHAR(500),
        backedup      integer default 0,
        \"ignore\"      integer default 0);

    CREATE INDEX IF NOT EXISTS backup_hostname_mountpoint_index
            on backup (hostname, mountpoint);

    COMMIT;";

        let conn = self.connection()?;
        conn.execute_batch(setup_queries)
            .map_err(|cause| query_error("create tables", cause))?;
        info!("Database schema initialized successfully");
        Ok(())
    }

    fn select_records(&self, operation: &str, sql: &str) -> Result<Vec<BackupRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|cause| query_error(operation, cause))?;

        let rows = stmt
            .query_map([], map_record)
            .map_err(|cause| query_error(operation, cause))?;

        rows.collect::<rusqlite::Result<Vec<BackupRecord>>>()
            .map_err(|cause| query_error(operation, cause))
    }
}

impl StatusStore for SqliteStore {
    fn replace(&self, record: &BackupRecord) -> Result<()> {
        let mut conn = self.connection()?;

        // IMMEDIATE takes the write lock up front so concurrent replaces of
        // the same key serialize instead of interleaving delete and insert.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|cause| query_error("begin replace", cause))?;

        let removed = tx
            .execute(
                "DELETE FROM backup WHERE hostname=?1 AND mountpoint=?2",
                (&record.hostname, &record.mountpoint),
            )
            .map_err(|cause| query_error("delete previous record", cause))?;

        tx.execute(
            "INSERT INTO backup (hostname, mountpoint, backedup, \"ignore\")
                VALUES (?1, ?2, ?3, ?4)",
            (
                &record.hostname,
                &record.mountpoint,
                record.backed_up,
                record.ignored,
            ),
        )
        .map_err(|cause| query_error("insert record", cause))?;

        tx.commit()
            .map_err(|cause| query_error("commit replace", cause))?;

        debug!(
            "Replaced record {}:{} (removed {} previous)",
            record.hostname, record.mountpoint, removed
        );
        Ok(())
    }

    fn find(&self, hostname: &str, mountpoint: &str) -> Result<Option<BackupRecord>> {
        let conn = self.connection()?;
        let sql = format!(
            "SELECT {}
                FROM backup
                WHERE hostname=?1
                    AND mountpoint=?2
                ORDER BY id DESC
                LIMIT 1",
            RECORD_COLUMNS
        );

        conn.query_row(&sql, [hostname, mountpoint], map_record)
            .optional()
            .map_err(|cause| query_error("find record", cause))
    }

    fn list_ordered(&self) -> Result<Vec<BackupRecord>> {
        let sql = format!(
            "SELECT {} FROM backup ORDER BY hostname, backedup, mountpoint",
            RECORD_COLUMNS
        );
        self.select_records("list records", &sql)
    }

    fn list_ignored(&self) -> Result<Vec<BackupRecord>> {
        let sql = format!(
            "SELECT {} FROM backup WHERE \"ignore\"=1 ORDER BY hostname, mountpoint",
            RECORD_COLUMNS
        );
        self.select_records("list ignored records", &sql)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<BackupRecord> {
    Ok(BackupRecord {
        id: row.get(0)?,
        hostname: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        mountpoint: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        backed_up: row.get(3)?,
        ignored: row.get(4)?,
    })
}

fn query_error(operation: &str, cause: rusqlite::Error) -> StatusError {
    StatusError::DatabaseQuery {
        operation: operation.to_string(),
        cause,
    }
}
