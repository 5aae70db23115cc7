use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::{PrizeValue, TreasureId};
use crate::entities::{money_values, prelude::*};
use crate::models::PrizeBox;

pub struct PrizeBoxRepository {
    conn: DatabaseConnection,
}

impl PrizeBoxRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: money_values::Model) -> PrizeBox {
        PrizeBox {
            id: model.id,
            treasure_id: TreasureId::new(model.treasure_id),
            amt: model.amt,
        }
    }

    /// Boxes owned by `treasure_id`, in insertion order.
    pub async fn list_for_treasure(&self, treasure_id: TreasureId) -> Result<Vec<PrizeBox>> {
        let rows = MoneyValues::find()
            .filter(money_values::Column::TreasureId.eq(treasure_id.value()))
            .order_by_asc(money_values::Column::Id)
            .all(&self.conn)
            .await
            .with_context(|| format!("Failed to list boxes for treasure {treasure_id}"))?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn insert(&self, treasure_id: TreasureId, amt: PrizeValue) -> Result<PrizeBox> {
        let active_model = money_values::ActiveModel {
            treasure_id: Set(treasure_id.value()),
            amt: Set(amt.amt()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to insert box for treasure {treasure_id}"))?;

        info!("Added box {} (amt {}) to treasure {}", model.id, model.amt, treasure_id);
        Ok(Self::map_model(model))
    }
}
