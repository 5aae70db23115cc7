use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{PrizeValue, TreasureId};
use crate::models::{NewTreasure, PrizeBox, Treasure};

pub mod migrator;
pub mod repositories;
mod seed;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn treasure_repo(&self) -> repositories::treasure::TreasureRepository {
        repositories::treasure::TreasureRepository::new(self.conn.clone())
    }

    fn prize_box_repo(&self) -> repositories::prize_box::PrizeBoxRepository {
        repositories::prize_box::PrizeBoxRepository::new(self.conn.clone())
    }

    pub async fn list_treasures(&self) -> Result<Vec<Treasure>> {
        self.treasure_repo().list_all().await
    }

    pub async fn get_treasure(&self, id: TreasureId) -> Result<Option<Treasure>> {
        self.treasure_repo().get(id).await
    }

    pub async fn treasure_exists(&self, id: TreasureId, name: &str) -> Result<bool> {
        self.treasure_repo().exists_with_id_or_name(id, name).await
    }

    pub async fn treasure_count(&self) -> Result<u64> {
        self.treasure_repo().count().await
    }

    pub async fn add_treasure(&self, treasure: &NewTreasure) -> Result<Treasure> {
        self.treasure_repo().insert(treasure).await
    }

    pub async fn list_boxes(&self, treasure_id: TreasureId) -> Result<Vec<PrizeBox>> {
        self.prize_box_repo().list_for_treasure(treasure_id).await
    }

    pub async fn add_box(&self, treasure_id: TreasureId, amt: PrizeValue) -> Result<PrizeBox> {
        self.prize_box_repo().insert(treasure_id, amt).await
    }

    /// Inserts the demo catalog when no treasures exist yet. Returns the
    /// number of rows written.
    pub async fn seed_demo_catalog(&self) -> Result<usize> {
        if self.treasure_count().await? > 0 {
            info!("Treasure catalog already populated, skipping seed");
            return Ok(0);
        }

        let rows = seed::demo_treasures();
        self.treasure_repo().insert_many(&rows).await?;

        info!("Seeded {} demo treasures", rows.len());
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::domain::validation::validate_prize_value;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn new_treasure(id: i32, name: &str) -> NewTreasure {
        NewTreasure {
            id: TreasureId::new(id),
            name: name.to_string(),
            coordinate: Coordinate::new(14.5437648051331, 121.019911678311),
        }
    }

    #[tokio::test]
    async fn test_treasure_roundtrip() {
        let store = memory_store().await;

        let created = store.add_treasure(&new_treasure(100, "T1")).await.unwrap();
        assert_eq!(created.id, TreasureId::new(100));
        assert!((created.latitude - 14.543_764_81).abs() < 1e-9);

        let fetched = store.get_treasure(TreasureId::new(100)).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(store.get_treasure(TreasureId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_matches_id_or_name() {
        let store = memory_store().await;
        store.add_treasure(&new_treasure(100, "T1")).await.unwrap();

        assert!(store.treasure_exists(TreasureId::new(100), "other").await.unwrap());
        assert!(store.treasure_exists(TreasureId::new(5), "T1").await.unwrap());
        assert!(!store.treasure_exists(TreasureId::new(5), "T5").await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_name_enforced_by_storage() {
        let store = memory_store().await;
        store.add_treasure(&new_treasure(100, "T1")).await.unwrap();
        assert!(store.add_treasure(&new_treasure(101, "T1")).await.is_err());
        assert!(store.add_treasure(&new_treasure(100, "T2")).await.is_err());
    }

    #[tokio::test]
    async fn test_boxes_listed_in_insertion_order() {
        let store = memory_store().await;
        store.add_treasure(&new_treasure(100, "T1")).await.unwrap();
        store.add_treasure(&new_treasure(101, "T2")).await.unwrap();

        for amt in ["20", "15", "25"] {
            let amt = validate_prize_value(Some(amt)).unwrap();
            store.add_box(TreasureId::new(100), amt).await.unwrap();
        }
        let other = validate_prize_value(Some("10")).unwrap();
        store.add_box(TreasureId::new(101), other).await.unwrap();

        let boxes = store.list_boxes(TreasureId::new(100)).await.unwrap();
        assert_eq!(boxes.iter().map(|b| b.amt).collect::<Vec<_>>(), vec![20, 15, 25]);
        assert!(boxes.iter().all(|b| b.treasure_id == TreasureId::new(100)));
    }

    #[tokio::test]
    async fn test_box_requires_existing_treasure() {
        let store = memory_store().await;
        let amt = validate_prize_value(Some("10")).unwrap();
        assert!(store.add_box(TreasureId::new(999), amt).await.is_err());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = memory_store().await;
        assert_eq!(store.seed_demo_catalog().await.unwrap(), 18);
        assert_eq!(store.seed_demo_catalog().await.unwrap(), 0);

        let treasures = store.list_treasures().await.unwrap();
        assert_eq!(treasures.len(), 18);
        assert_eq!(treasures[0].name, "T1");
        assert_eq!(treasures[17].id, TreasureId::new(117));
    }
}
