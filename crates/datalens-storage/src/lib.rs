pub mod config;
pub mod models;
pub mod schema;

use std::path::Path;

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

use datalens_config::{ConfigError, DatalensPaths};
use datalens_core::domain::{DashboardDefinition, DashboardId, TrackRecord, UserId};
use datalens_core::ports::{DashboardRepository, RepoError, TrackRepository};

use crate::config::StorageConfig;
use crate::models::{DashboardRow, NewTrackRow, TrackRow};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("connection pool: {0}")]
  Pool(#[from] diesel::r2d2::PoolError),
  #[error("query: {0}")]
  Query(#[from] DieselError),
  #[error("migration: {0}")]
  Migration(String),
  #[error("config: {0}")]
  Config(#[from] ConfigError),
  #[error("blocking task: {0}")]
  Task(#[from] tokio::task::JoinError),
  #[error("corrupt row: {0}")]
  Corrupt(String),
}

impl From<StorageError> for RepoError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::Query(DieselError::NotFound) => RepoError::NotFound,
      StorageError::Query(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
        RepoError::Conflict(info.message().to_string())
      }
      other => RepoError::Storage(other.to_string()),
    }
  }
}

/// Applies per-connection pragmas every time the pool hands one out.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: Option<String>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = String::from("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;");
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// SQLite-backed store for track records and dashboard definitions.
///
/// Diesel is synchronous; every port call runs on the blocking pool with
/// its own pooled connection.
#[derive(Clone)]
pub struct LibraryStore {
  pool: SqlitePool,
}

impl LibraryStore {
  /// Opens (creating if needed) the database at `path` and runs pending
  /// migrations.
  pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(path.to_string_lossy());
    let pool = Pool::builder()
      .max_size(config.pool_size.max(1))
      .connection_customizer(Box::new(ConnectionOptions { journal_mode: config.journal_mode.clone() }))
      .build(manager)?;

    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
    tracing::info!(db = %path.display(), migrations = applied.len(), "storage ready");

    Ok(Self { pool })
  }

  /// Opens the database named by the `[storage]` config section.
  pub fn from_config(paths: &DatalensPaths) -> Result<Self, StorageError> {
    let config = StorageConfig::load()?;
    Self::open(&config.database_path(paths), &config)
  }

  async fn run<F, R>(&self, f: F) -> Result<R, StorageError>
  where
    F: FnOnce(&mut SqliteConnection) -> Result<R, StorageError> + Send + 'static,
    R: Send + 'static,
  {
    let pool = self.pool.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      f(&mut *conn)
    })
    .await?
  }
}

#[async_trait]
impl TrackRepository for LibraryStore {
  async fn records_for_user(&self, user: UserId) -> Result<Vec<TrackRecord>, RepoError> {
    use crate::schema::tracks::dsl::*;

    let owner = user.to_string();
    let rows = self
      .run(move |conn| {
        Ok(tracks.filter(user_id.eq(owner)).order(id.asc()).select(TrackRow::as_select()).load(conn)?)
      })
      .await?;

    let records = rows.into_iter().map(TrackRecord::try_from).collect::<Result<Vec<_>, _>>()?;
    Ok(records)
  }

  async fn insert_records(&self, user: UserId, records: &[TrackRecord]) -> Result<usize, RepoError> {
    use crate::schema::tracks::dsl::*;

    let batch = records.to_vec();
    let added = self
      .run(move |conn| {
        conn.transaction(|conn| {
          let mut added = 0;
          for record in &batch {
            let row = NewTrackRow::from_record(user, record);
            added += diesel::insert_or_ignore_into(tracks).values(row).execute(conn)?;
          }
          Ok::<_, StorageError>(added)
        })
      })
      .await?;

    tracing::debug!(user = %user, offered = records.len(), added, "inserted track rows");
    Ok(added)
  }

  async fn delete_for_user(&self, user: UserId) -> Result<usize, RepoError> {
    use crate::schema::tracks::dsl::*;

    let owner = user.to_string();
    Ok(self.run(move |conn| Ok(diesel::delete(tracks.filter(user_id.eq(owner))).execute(conn)?)).await?)
  }
}

#[async_trait]
impl DashboardRepository for LibraryStore {
  async fn insert(&self, definition: &DashboardDefinition) -> Result<(), RepoError> {
    use crate::schema::dashboards::dsl::*;

    let row = DashboardRow::from(definition);
    self.run(move |conn| Ok(diesel::insert_into(dashboards).values(&row).execute(conn)?)).await?;

    Ok(())
  }

  async fn get(&self, dashboard_id: DashboardId) -> Result<Option<DashboardDefinition>, RepoError> {
    use crate::schema::dashboards::dsl::*;

    let key = dashboard_id.to_string();
    let row = self
      .run(move |conn| {
        Ok(dashboards.filter(id.eq(key)).select(DashboardRow::as_select()).first(conn).optional()?)
      })
      .await?;

    Ok(row.map(DashboardDefinition::try_from).transpose()?)
  }

  async fn list_for_user(&self, user: UserId) -> Result<Vec<DashboardDefinition>, RepoError> {
    use crate::schema::dashboards::dsl::*;

    let owner = user.to_string();
    let rows = self
      .run(move |conn| {
        Ok(
          dashboards
            .filter(user_id.eq(owner))
            .order((created_at.asc(), id.asc()))
            .select(DashboardRow::as_select())
            .load(conn)?,
        )
      })
      .await?;

    Ok(rows.into_iter().map(DashboardDefinition::try_from).collect::<Result<Vec<_>, _>>()?)
  }

  async fn name_taken(&self, user: UserId, dashboard_name: &str) -> Result<bool, RepoError> {
    use crate::schema::dashboards::dsl::*;

    let owner = user.to_string();
    let wanted = dashboard_name.to_string();
    let taken = self
      .run(move |conn| {
        Ok(diesel::select(diesel::dsl::exists(dashboards.filter(user_id.eq(owner)).filter(name.eq(wanted))))
          .get_result::<bool>(conn)?)
      })
      .await?;

    Ok(taken)
  }

  async fn delete_for_user(&self, user: UserId) -> Result<usize, RepoError> {
    use crate::schema::dashboards::dsl::*;

    let owner = user.to_string();
    Ok(self.run(move |conn| Ok(diesel::delete(dashboards.filter(user_id.eq(owner))).execute(conn)?)).await?)
  }
}
