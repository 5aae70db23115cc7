//! Domain service for the treasure catalog.
//!
//! Covers the proximity search and the two create operations. Inputs arrive
//! already validated (see [`crate::domain::validation`]); the service owns
//! storage access, conflict detection and the search fan-out.

use thiserror::Error;

use crate::domain::validation::InvalidInput;
use crate::domain::{PrizeValue, TreasureId};
use crate::models::{NewTreasure, SearchQuery, SearchResult, Treasure, TreasureWithBoxes};

/// Errors specific to treasure operations.
#[derive(Debug, Error)]
pub enum TreasureError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Search timed out after {0}s")]
    Timeout(u64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<InvalidInput> for TreasureError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err.0)
    }
}

impl From<sea_orm::DbErr> for TreasureError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TreasureError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for treasures.
#[async_trait::async_trait]
pub trait TreasureService: Send + Sync {
    /// Treasures within the query radius, in catalog order, each with its
    /// selected boxes. Fails as a whole if any lookup fails.
    async fn search(&self, query: SearchQuery) -> Result<SearchResult, TreasureError>;

    /// Persists a new treasure. Fails with `Conflict` when its id or name is taken.
    async fn create_treasure(&self, treasure: NewTreasure) -> Result<Treasure, TreasureError>;

    /// Attaches a box to an existing treasure.
    async fn create_prize_box(
        &self,
        treasure_id: TreasureId,
        amt: PrizeValue,
    ) -> Result<TreasureWithBoxes, TreasureError>;
}
