pub mod prelude;

pub mod money_values;
pub mod treasures;
