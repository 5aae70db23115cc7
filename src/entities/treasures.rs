use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "treasures")]
pub struct Model {
    /// Caller-assigned, never generated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub latitude: f64,

    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::money_values::Entity")]
    MoneyValues,
}

impl Related<super::money_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoneyValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
