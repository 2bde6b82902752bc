use std::sync::Arc;

use tracing::info;

use super::{
    config::{Config, StoreBackend},
    database::{ProductStore, RedisStore, init_redis},
    error::ServerError,
    memory::MemoryStore,
};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, ServerError> {
        let config = Config::load()?;

        let store: Arc<dyn ProductStore> = match config.store_backend {
            StoreBackend::Redis => {
                let connection = init_redis(&config.redis_url).await?;
                Arc::new(RedisStore::new(connection))
            }
            StoreBackend::Memory => match &config.catalog_seed {
                Some(path) => {
                    info!("Seeding memory store from {}", path.display());
                    Arc::new(MemoryStore::from_seed(path).await?)
                }
                None => Arc::new(MemoryStore::new()),
            },
        };

        info!("Using {} product store", config.store_backend);

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn ProductStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
