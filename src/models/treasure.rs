use serde::Serialize;

use crate::domain::{Coordinate, TreasureId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Treasure {
    pub id: TreasureId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Treasure {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A prize record owned by exactly one treasure (`money_values` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrizeBox {
    pub id: i32,
    pub treasure_id: TreasureId,
    pub amt: i32,
}

/// Validated input for a treasure insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTreasure {
    pub id: TreasureId,
    pub name: String,
    pub coordinate: Coordinate,
}

/// A treasure together with the boxes just attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct TreasureWithBoxes {
    #[serde(flatten)]
    pub treasure: Treasure,
    #[serde(rename = "box")]
    pub boxes: Vec<PrizeBox>,
}
