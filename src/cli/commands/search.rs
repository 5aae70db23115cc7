use anyhow::Context;

use crate::api::ApiResponse;
use crate::config::Config;
use crate::constants::messages;
use crate::db::Store;
use crate::domain::validation::validate_search_query;
use crate::services::{SeaOrmTreasureService, TreasureService};

pub async fn cmd_search(
    config: &Config,
    latitude: &str,
    longitude: &str,
    distance: &str,
    prize_value: Option<&str>,
) -> anyhow::Result<()> {
    let query = validate_search_query(Some(latitude), Some(longitude), Some(distance), prize_value)?;

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let service = SeaOrmTreasureService::new(store, config.search.clone());
    let result = service.search(query).await?;

    let envelope = ApiResponse::success(result, messages::TREASURES_RETRIEVED);
    let output =
        serde_json::to_string_pretty(&envelope).context("Failed to render search result")?;
    println!("{output}");

    Ok(())
}
