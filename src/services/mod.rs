pub mod treasure_service;
pub mod treasure_service_impl;
pub use treasure_service::{TreasureError, TreasureService};
pub use treasure_service_impl::SeaOrmTreasureService;
