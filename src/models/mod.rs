pub mod search;
pub mod treasure;

pub use search::{SearchQuery, SearchResult, TreasureMatch};
pub use treasure::{NewTreasure, PrizeBox, Treasure, TreasureWithBoxes};
