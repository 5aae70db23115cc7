pub mod prize_box;
pub mod treasure;
