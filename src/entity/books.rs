use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_books::Entity")]
    OrderBooks,
}

impl Related<super::order_books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderBooks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
