pub use super::money_values::Entity as MoneyValues;
pub use super::treasures::Entity as Treasures;
