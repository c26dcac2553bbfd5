use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    auth::jwt::JwtKeys,
    config::AppConfig,
    store::{CredentialStore, MemoryStore, PgStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub keys: JwtKeys,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connects the configured backend and runs migrations on it.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn CredentialStore> = match config.database_url.as_deref() {
            Some(url) => {
                let pg = PgStore::connect(url, config.db_max_connections).await?;
                pg.migrate().await?;
                info!("connected to postgres, migrations applied");
                Arc::new(pg)
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory store, data will not persist");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn CredentialStore>, config: Arc<AppConfig>) -> Self {
        let keys = JwtKeys::new(&config.jwt);
        Self {
            store,
            keys,
            config,
        }
    }
}
