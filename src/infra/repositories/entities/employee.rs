//! SeaORM entity for the `employees` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub department_id: i32,
    pub role_in_company: String,
    pub hired_at: Date,
    pub is_on_holiday: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Employee {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            middle_name: m.middle_name,
            department_id: m.department_id,
            role_in_company: m.role_in_company,
            hired_at: m.hired_at,
            is_on_holiday: m.is_on_holiday,
        }
    }
}
