use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::constants::geo::COORDINATE_SCALE;
use crate::domain::TreasureId;
use crate::entities::{prelude::*, treasures};
use crate::models::{NewTreasure, Treasure};

/// Rounds to the fixed decimal scale of the coordinate columns.
fn to_column_scale(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_SCALE);
    (value * factor).round() / factor
}

pub struct TreasureRepository {
    conn: DatabaseConnection,
}

impl TreasureRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: treasures::Model) -> Treasure {
        Treasure {
            id: TreasureId::new(model.id),
            name: model.name,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }

    fn active_model(treasure: &NewTreasure) -> treasures::ActiveModel {
        treasures::ActiveModel {
            id: Set(treasure.id.value()),
            name: Set(treasure.name.clone()),
            latitude: Set(to_column_scale(treasure.coordinate.latitude)),
            longitude: Set(to_column_scale(treasure.coordinate.longitude)),
        }
    }

    /// Full catalog in ascending id order.
    pub async fn list_all(&self) -> Result<Vec<Treasure>> {
        let rows = Treasures::find()
            .order_by_asc(treasures::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list treasures")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: TreasureId) -> Result<Option<Treasure>> {
        let row = Treasures::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query treasure by ID")?;

        Ok(row.map(Self::map_model))
    }

    /// True when any treasure already uses `id` or `name`.
    pub async fn exists_with_id_or_name(&self, id: TreasureId, name: &str) -> Result<bool> {
        let count = Treasures::find()
            .filter(
                Condition::any()
                    .add(treasures::Column::Id.eq(id.value()))
                    .add(treasures::Column::Name.eq(name)),
            )
            .count(&self.conn)
            .await
            .context("Failed to check for existing treasure")?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Treasures::find()
            .count(&self.conn)
            .await
            .context("Failed to count treasures")
    }

    pub async fn insert(&self, treasure: &NewTreasure) -> Result<Treasure> {
        let model = Self::active_model(treasure)
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to insert treasure {}", treasure.id))?;

        info!("Created treasure {} ({})", model.id, model.name);
        Ok(Self::map_model(model))
    }

    /// Inserts every row in one transaction.
    pub async fn insert_many(&self, rows: &[NewTreasure]) -> Result<()> {
        let txn = self.conn.begin().await?;

        for row in rows {
            Self::active_model(row)
                .insert(&txn)
                .await
                .with_context(|| format!("Failed to insert treasure {}", row.id))?;
        }

        txn.commit().await?;
        Ok(())
    }
}
