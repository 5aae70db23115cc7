use crate::config::Config;
use crate::db::Store;

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    match store.seed_demo_catalog().await? {
        0 => println!("Treasure catalog already has data, nothing seeded"),
        n => println!("Seeded {n} demo treasures"),
    }

    Ok(())
}
