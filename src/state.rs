use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmTreasureService, TreasureService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub treasure_service: Arc<dyn TreasureService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if config.general.seed_demo_data {
            store.seed_demo_catalog().await?;
        }

        let treasure_service = Arc::new(SeaOrmTreasureService::new(
            store,
            config.search.clone(),
        )) as Arc<dyn TreasureService>;

        Ok(Self {
            config: Arc::new(config),
            treasure_service,
        })
    }
}
