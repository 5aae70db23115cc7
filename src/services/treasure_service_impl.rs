//! `SeaORM` implementation of the `TreasureService` trait.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use sea_orm::{DbErr, SqlErr};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::constants::messages;
use crate::db::Store;
use crate::domain::box_filter::select_boxes;
use crate::domain::distance::{haversine_km, within_radius};
use crate::domain::{PrizeValue, TreasureId};
use crate::models::{
    NewTreasure, SearchQuery, SearchResult, Treasure, TreasureMatch, TreasureWithBoxes,
};
use crate::services::treasure_service::{TreasureError, TreasureService};

/// Maps constraint violations raised by an insert. The storage constraints
/// back up the existence checks done before each write.
fn map_write_error(err: anyhow::Error) -> TreasureError {
    match err.downcast_ref::<DbErr>().and_then(DbErr::sql_err) {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("Treasure insert hit unique constraint: {}", detail);
            TreasureError::Conflict(messages::TREASURE_EXISTS.to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            warn!("Box insert hit foreign key constraint: {}", detail);
            TreasureError::NotFound(messages::TREASURE_NOT_FOUND.to_string())
        }
        _ => err.into(),
    }
}

/// Runs `work` under a deadline of `secs` seconds (0 means none). On expiry
/// the work is dropped, so nothing it produced so far is returned.
async fn within_deadline<T>(
    secs: u64,
    work: impl Future<Output = Result<T, TreasureError>>,
) -> Result<T, TreasureError> {
    if secs == 0 {
        return work.await;
    }

    tokio::time::timeout(Duration::from_secs(secs), work)
        .await
        .map_err(|_| {
            warn!("Treasure search exceeded {}s deadline", secs);
            TreasureError::Timeout(secs)
        })?
}

pub struct SeaOrmTreasureService {
    store: Store,
    settings: SearchConfig,
}

impl SeaOrmTreasureService {
    #[must_use]
    pub const fn new(store: Store, settings: SearchConfig) -> Self {
        Self { store, settings }
    }

    async fn run_search(&self, query: SearchQuery) -> Result<SearchResult, TreasureError> {
        let catalog = self.store.list_treasures().await?;
        let catalog_size = catalog.len();

        let hits: Vec<(Treasure, f64)> = catalog
            .into_iter()
            .filter_map(|treasure| {
                let distance_km = haversine_km(query.origin, treasure.coordinate());
                within_radius(distance_km, query.radius).then_some((treasure, distance_km))
            })
            .collect();

        // `buffered` yields in input order, so output stays in catalog order
        // whatever order the lookups finish in.
        let treasures = stream::iter(hits)
            .map(|(treasure, distance_in_km)| async move {
                let boxes = self.store.list_boxes(treasure.id).await?;
                Ok::<_, TreasureError>(TreasureMatch {
                    boxes: select_boxes(boxes, query.prize_floor),
                    treasure,
                    distance_in_km,
                })
            })
            .buffered(self.settings.fanout_concurrency.max(1))
            .try_collect::<Vec<_>>()
            .await?;

        debug!(
            catalog_size,
            matches = treasures.len(),
            radius = %query.radius,
            "Treasure search evaluated catalog"
        );

        Ok(SearchResult::new(treasures))
    }
}

#[async_trait]
impl TreasureService for SeaOrmTreasureService {
    #[allow(clippy::cast_precision_loss)]
    async fn search(&self, query: SearchQuery) -> Result<SearchResult, TreasureError> {
        let started = Instant::now();

        let result =
            within_deadline(self.settings.timeout_seconds, self.run_search(query)).await?;

        metrics::histogram!("treasure_search_matches").record(result.count as f64);
        info!(
            latitude = query.origin.latitude,
            longitude = query.origin.longitude,
            radius = %query.radius,
            prize_floor = query.prize_floor.map(|p| p.amt()),
            count = result.count,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Treasure search finished"
        );

        Ok(result)
    }

    async fn create_treasure(&self, treasure: NewTreasure) -> Result<Treasure, TreasureError> {
        if self.store.treasure_exists(treasure.id, &treasure.name).await? {
            return Err(TreasureError::Conflict(
                messages::TREASURE_EXISTS.to_string(),
            ));
        }

        let created = self
            .store
            .add_treasure(&treasure)
            .await
            .map_err(map_write_error)?;

        metrics::counter!("treasures_created_total").increment(1);
        Ok(created)
    }

    async fn create_prize_box(
        &self,
        treasure_id: TreasureId,
        amt: PrizeValue,
    ) -> Result<TreasureWithBoxes, TreasureError> {
        let treasure = self
            .store
            .get_treasure(treasure_id)
            .await?
            .ok_or_else(|| TreasureError::NotFound(messages::TREASURE_NOT_FOUND.to_string()))?;

        let created = self
            .store
            .add_box(treasure_id, amt)
            .await
            .map_err(map_write_error)?;

        metrics::counter!("prize_boxes_created_total").increment(1);
        Ok(TreasureWithBoxes {
            treasure,
            boxes: vec![created],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{validate_prize_value, validate_search_query};
    use crate::domain::{Coordinate, RadiusClass};

    async fn seeded_service() -> SeaOrmTreasureService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.seed_demo_catalog().await.unwrap();
        SeaOrmTreasureService::new(store, SearchConfig::default())
    }

    fn prize(raw: &str) -> PrizeValue {
        validate_prize_value(Some(raw)).unwrap()
    }

    fn makati_query(distance: &str, prize_value: Option<&str>) -> SearchQuery {
        validate_search_query(
            Some("14.552036595352455"),
            Some("121.01696118771324"),
            Some(distance),
            prize_value,
        )
        .unwrap()
    }

    async fn add_boxes(service: &SeaOrmTreasureService, id: i32, amts: &[&str]) {
        for amt in amts {
            service
                .create_prize_box(TreasureId::new(id), prize(amt))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_search_one_km_matches_reference_scenario() {
        let service = seeded_service().await;
        add_boxes(&service, 100, &["15", "20", "15"]).await;
        add_boxes(&service, 102, &["25", "10"]).await;

        let result = service.search(makati_query("1", None)).await.unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(result.count, result.treasures.len());
        let names: Vec<_> = result.treasures.iter().map(|m| m.treasure.name.as_str()).collect();
        assert_eq!(names, vec!["T1", "T3"]);

        let t1 = &result.treasures[0];
        assert!((t1.distance_in_km - 0.973_057_651_911_466_4).abs() < 1e-6);
        assert_eq!(t1.boxes.iter().map(|b| b.amt).collect::<Vec<_>>(), vec![15, 15]);

        let t3 = &result.treasures[1];
        assert!((t3.distance_in_km - 0.900_031_480_977_825_7).abs() < 1e-6);
        assert_eq!(t3.boxes.iter().map(|b| b.amt).collect::<Vec<_>>(), vec![10]);
    }

    #[tokio::test]
    async fn test_search_with_floor_keeps_boxes_at_or_above() {
        let service = seeded_service().await;
        add_boxes(&service, 100, &["15", "20", "25"]).await;

        let result = service.search(makati_query("1", Some("20"))).await.unwrap();
        let t1 = &result.treasures[0];
        assert_eq!(t1.boxes.iter().map(|b| b.amt).collect::<Vec<_>>(), vec![20, 25]);
        // Treasures without qualifying boxes still match the radius.
        assert!(result.treasures[1].boxes.is_empty());
    }

    #[tokio::test]
    async fn test_search_ten_km_keeps_catalog_order() {
        let service = seeded_service().await;
        let result = service.search(makati_query("10", None)).await.unwrap();

        assert!(result.count > 2);
        let ids: Vec<i32> = result.treasures.iter().map(|m| m.treasure.id.value()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert!(result.treasures.iter().all(|m| m.distance_in_km <= 10.0));
        assert!(result.treasures.iter().all(|m| m.boxes.is_empty()));
    }

    #[tokio::test]
    async fn test_search_is_order_stable_with_single_lookup_slot() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.seed_demo_catalog().await.unwrap();
        let narrow = SeaOrmTreasureService::new(
            store.clone(),
            SearchConfig {
                fanout_concurrency: 1,
                timeout_seconds: 0,
            },
        );
        let wide = SeaOrmTreasureService::new(store, SearchConfig::default());

        let a = narrow.search(makati_query("10", None)).await.unwrap();
        let b = wide.search(makati_query("10", None)).await.unwrap();
        let ids = |r: &SearchResult| r.treasures.iter().map(|m| m.treasure.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[tokio::test]
    async fn test_search_at_query_point_is_zero_distance() {
        let service = seeded_service().await;
        let query = SearchQuery {
            origin: Coordinate::new(14.543_764_81, 121.019_911_68),
            radius: RadiusClass::OneKm,
            prize_floor: None,
        };
        let result = service.search(query).await.unwrap();
        assert_eq!(result.treasures[0].treasure.name, "T1");
        assert!(result.treasures[0].distance_in_km.abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_search_far_away_is_empty() {
        let service = seeded_service().await;
        let query = SearchQuery {
            origin: Coordinate::new(-33.8688, 151.2093),
            radius: RadiusClass::TenKm,
            prize_floor: None,
        };
        let result = service.search(query).await.unwrap();
        assert_eq!(result.count, 0);
        assert!(result.treasures.is_empty());
    }

    #[tokio::test]
    async fn test_create_treasure_conflicts() {
        let service = seeded_service().await;
        let fresh = NewTreasure {
            id: TreasureId::new(1000),
            name: "Treasure 101".to_string(),
            coordinate: Coordinate::new(14.166_881, 121.301_323),
        };
        let created = service.create_treasure(fresh.clone()).await.unwrap();
        assert_eq!(created.id, TreasureId::new(1000));

        let same_id = NewTreasure {
            name: "Another".to_string(),
            ..fresh.clone()
        };
        assert!(matches!(
            service.create_treasure(same_id).await,
            Err(TreasureError::Conflict(_))
        ));

        let same_name = NewTreasure {
            id: TreasureId::new(1001),
            ..fresh
        };
        assert!(matches!(
            service.create_treasure(same_name).await,
            Err(TreasureError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_constraints_map_to_domain_errors() {
        let service = seeded_service().await;
        let store = &service.store;

        // Inserting through the store skips the existence check in `create_treasure`.
        let same_name = NewTreasure {
            id: TreasureId::new(5000),
            name: "T1".to_string(),
            coordinate: Coordinate::new(1.0, 1.0),
        };
        let err = store.add_treasure(&same_name).await.unwrap_err();
        assert!(matches!(map_write_error(err), TreasureError::Conflict(_)));

        let same_id = NewTreasure {
            id: TreasureId::new(100),
            name: "Unused name".to_string(),
            coordinate: Coordinate::new(1.0, 1.0),
        };
        let err = store.add_treasure(&same_id).await.unwrap_err();
        assert!(matches!(map_write_error(err), TreasureError::Conflict(_)));

        let err = store
            .add_box(TreasureId::new(4242), prize("20"))
            .await
            .unwrap_err();
        match map_write_error(err) {
            TreasureError::NotFound(message) => {
                assert_eq!(message, messages::TREASURE_NOT_FOUND);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deadline_expiry_returns_timeout_without_data() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(SearchResult::new(Vec::new()))
        };

        let started = Instant::now();
        let outcome = within_deadline(1, slow).await;
        assert!(matches!(outcome, Err(TreasureError::Timeout(1))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_zero_deadline_waits_for_work() {
        let work = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, TreasureError>(7)
        };
        assert_eq!(within_deadline(0, work).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_create_prize_box() {
        let service = seeded_service().await;

        let created = service
            .create_prize_box(TreasureId::new(100), prize("30"))
            .await
            .unwrap();
        assert_eq!(created.treasure.name, "T1");
        assert_eq!(created.boxes.len(), 1);
        assert_eq!(created.boxes[0].amt, 30);
        assert_eq!(created.boxes[0].treasure_id, TreasureId::new(100));

        assert!(matches!(
            service
                .create_prize_box(TreasureId::new(4242), prize("30"))
                .await,
            Err(TreasureError::NotFound(_))
        ));
    }
}
