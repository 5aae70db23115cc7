use serde::Serialize;

use super::{PrizeBox, Treasure};
use crate::domain::{Coordinate, PrizeValue, RadiusClass};

/// A validated proximity query. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub origin: Coordinate,
    pub radius: RadiusClass,
    /// `None` selects the cheapest boxes; `Some` selects boxes at or above the floor.
    pub prize_floor: Option<PrizeValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreasureMatch {
    #[serde(flatten)]
    pub treasure: Treasure,
    pub distance_in_km: f64,
    pub boxes: Vec<PrizeBox>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub treasures: Vec<TreasureMatch>,
    pub count: usize,
}

impl SearchResult {
    #[must_use]
    pub fn new(treasures: Vec<TreasureMatch>) -> Self {
        let count = treasures.len();
        Self { treasures, count }
    }
}
