//! SeaORM entity for the `holiday_histories` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "holiday_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    /// Column names are the SQL keywords `start`/`end`; SeaORM quotes them
    #[sea_orm(column_name = "start")]
    pub start_date: Date,
    #[sea_orm(column_name = "end")]
    pub end_date: Date,
    pub created_by_hr: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Holiday {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            employee_id: m.employee_id,
            start: m.start_date,
            end: m.end_date,
            created_by_hr: m.created_by_hr,
        }
    }
}
