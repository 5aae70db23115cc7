use sea_orm_migration::prelude::*;

mod m20221021_104817_create_treasures;
mod m20221021_105435_create_money_values;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20221021_104817_create_treasures::Migration),
            Box::new(m20221021_105435_create_money_values::Migration),
        ]
    }
}
