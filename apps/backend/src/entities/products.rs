use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// Size charts and pictures are stored as JSON text; an empty string means unset.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub item: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock: i32,
    #[sea_orm(column_type = "Text")]
    pub pictures: String,
    #[sea_orm(column_type = "Text")]
    pub xs: String,
    #[sea_orm(column_type = "Text")]
    pub s: String,
    #[sea_orm(column_type = "Text")]
    pub m: String,
    #[sea_orm(column_type = "Text")]
    pub l: String,
    #[sea_orm(column_type = "Text")]
    pub xl: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
