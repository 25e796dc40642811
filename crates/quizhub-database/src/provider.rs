//! Store bundle that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use quizhub_core::config::{DatabaseConfig, DatabaseProvider};
use quizhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{CategoryRepository, RoleRepository, UserRepository};
use crate::store::{CategoryStore, RoleStore, UserStore};

/// The stores used by the service layer, all backed by one provider.
#[derive(Clone)]
pub struct Stores {
    /// Account storage.
    pub users: Arc<dyn UserStore>,
    /// Role storage.
    pub roles: Arc<dyn RoleStore>,
    /// Category storage.
    pub categories: Arc<dyn CategoryStore>,
    /// Connection pool when the provider is PostgreSQL.
    pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("provider", &self.provider_name())
            .finish_non_exhaustive()
    }
}

impl Stores {
    /// Open the stores selected by `database.provider`.
    ///
    /// For PostgreSQL this connects the pool and, when enabled, applies
    /// the embedded migrations.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                info!("Initializing PostgreSQL stores");
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(&db).await?;
                }
                Ok(Self::postgres(db))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            roles: Arc::new(RoleRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Stores backed by one shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            roles: Arc::new(store.clone()),
            categories: Arc::new(store),
            pool: None,
        }
    }

    /// Name of the active provider, for logs and health output.
    pub fn provider_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check that the backing database is reachable.
    pub async fn health_check(&self) -> AppResult<()> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(()),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
