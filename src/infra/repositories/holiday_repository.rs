//! Holiday ledger repository - trait and Postgres implementation.
//!
//! The ledger is append-only: entries are inserted and read, never
//! updated or removed. The append path recomputes the eligibility floor
//! inside its transaction, so two racing requests cannot both slip under
//! it on the strength of the same stale read.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::holiday_history::{ActiveModel, Column, Entity};
use crate::domain::{next_eligible_start, Holiday, NewHoliday};
use crate::errors::{AppError, AppResult};

/// Holiday ledger persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// The entry with the latest end date, ties broken by highest id
    async fn latest_for_employee(&self, employee_id: i32) -> AppResult<Option<Holiday>>;

    /// Full ledger for one employee, newest end date first
    async fn list_for_employee(&self, employee_id: i32) -> AppResult<Vec<Holiday>>;

    /// Append a ledger entry. With `enforce_floor` set, the eligibility
    /// floor is recomputed from `hired_at` and the current ledger in the
    /// same transaction as the write; a start before that floor is an
    /// `EligibilityViolation`.
    async fn insert(
        &self,
        data: NewHoliday,
        hired_at: NaiveDate,
        enforce_floor: bool,
    ) -> AppResult<Holiday>;
}

/// Postgres-backed holiday ledger
pub struct HolidayStore {
    db: DatabaseConnection,
}

impl HolidayStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn latest_end<C: ConnectionTrait>(
        conn: &C,
        employee_id: i32,
    ) -> AppResult<Option<NaiveDate>> {
        let model = Entity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .order_by_desc(Column::EndDate)
            .order_by_desc(Column::Id)
            .one(conn)
            .await?;
        Ok(model.map(|m| m.end_date))
    }
}

#[async_trait]
impl HolidayRepository for HolidayStore {
    async fn latest_for_employee(&self, employee_id: i32) -> AppResult<Option<Holiday>> {
        let model = Entity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .order_by_desc(Column::EndDate)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await?;
        Ok(model.map(Holiday::from))
    }

    async fn list_for_employee(&self, employee_id: i32) -> AppResult<Vec<Holiday>> {
        let models = Entity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .order_by_desc(Column::EndDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Holiday::from).collect())
    }

    async fn insert(
        &self,
        data: NewHoliday,
        hired_at: NaiveDate,
        enforce_floor: bool,
    ) -> AppResult<Holiday> {
        let txn = self.db.begin().await?;

        if enforce_floor {
            let last_end = Self::latest_end(&txn, data.employee_id).await?;
            let earliest = next_eligible_start(last_end, hired_at);
            if data.start < earliest {
                return Err(AppError::EligibilityViolation { earliest });
            }
        }

        let active = ActiveModel {
            id: NotSet,
            employee_id: Set(data.employee_id),
            start_date: Set(data.start),
            end_date: Set(data.end),
            created_by_hr: Set(data.created_by_hr),
        };

        let model = active.insert(&txn).await?;
        txn.commit().await?;
        Ok(Holiday::from(model))
    }
}
