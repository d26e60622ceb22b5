//! SeaORM entity for the `users` table.

use sea_orm::entity::prelude::*;

use crate::domain::Role;
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub department_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for crate::domain::User {
    type Error = AppError;

    fn try_from(m: Model) -> AppResult<Self> {
        // A role string the code does not know is a data error, not a default
        let role = Role::parse(&m.role).ok_or_else(|| {
            AppError::internal(format!("Unknown role '{}' for user {}", m.role, m.id))
        })?;

        Ok(Self {
            id: m.id,
            username: m.username,
            password_hash: m.password_hash,
            role,
            department_id: m.department_id,
        })
    }
}
