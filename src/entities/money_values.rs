use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "money_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub treasure_id: i32,
    pub amt: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::treasures::Entity",
        from = "Column::TreasureId",
        to = "super::treasures::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Treasures,
}

impl Related<super::treasures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Treasures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
