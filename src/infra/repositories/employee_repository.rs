//! Employee repository - trait and Postgres implementation.
//!
//! The insert and update paths run their duplicate-identity check and the
//! write in a single transaction. The unique expression index on
//! (first_name, last_name, COALESCE(middle_name, ''), department_id) is the
//! backstop for writers racing between check and write.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::entities::employee::{ActiveModel, Column, Entity};
use crate::domain::{
    canonical_middle_name, Employee, EmployeeSort, EmployeeSortKey, NewEmployee, SortDir,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Employee persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// Page of employees, optionally restricted to one department,
    /// with the total count matching the filter
    async fn list(
        &self,
        department_id: Option<i32>,
        page: &PaginationParams,
        sort: EmployeeSort,
    ) -> AppResult<(Vec<Employee>, u64)>;

    /// Insert a new employee; `DuplicateEmployee` when another record
    /// shares the same (first, last, middle, department) identity
    async fn insert(&self, data: NewEmployee) -> AppResult<Employee>;

    /// Full replace by id; the duplicate check excludes the record itself
    async fn update(&self, employee: Employee) -> AppResult<Employee>;

    /// Returns false when no row with this id existed
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Postgres-backed employee repository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Identity match condition with NULL and '' middle names unified
    fn identity_condition(
        first_name: &str,
        last_name: &str,
        middle_name: &Option<String>,
        department_id: i32,
    ) -> Condition {
        Condition::all()
            .add(Column::FirstName.eq(first_name))
            .add(Column::LastName.eq(last_name))
            .add(
                Expr::expr(Func::coalesce([
                    Expr::col(Column::MiddleName).into(),
                    Expr::val("").into(),
                ]))
                .eq(canonical_middle_name(middle_name)),
            )
            .add(Column::DepartmentId.eq(department_id))
    }

    async fn duplicate_exists<C: ConnectionTrait>(
        conn: &C,
        first_name: &str,
        last_name: &str,
        middle_name: &Option<String>,
        department_id: i32,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let mut query = Entity::find().filter(Self::identity_condition(
            first_name,
            last_name,
            middle_name,
            department_id,
        ));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }
}

fn order_column(key: EmployeeSortKey) -> Column {
    match key {
        EmployeeSortKey::Id => Column::Id,
        EmployeeSortKey::FirstName => Column::FirstName,
        EmployeeSortKey::LastName => Column::LastName,
        EmployeeSortKey::HiredAt => Column::HiredAt,
        EmployeeSortKey::DepartmentId => Column::DepartmentId,
        EmployeeSortKey::RoleInCompany => Column::RoleInCompany,
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Employee::from))
    }

    async fn list(
        &self,
        department_id: Option<i32>,
        page: &PaginationParams,
        sort: EmployeeSort,
    ) -> AppResult<(Vec<Employee>, u64)> {
        let mut query = Entity::find();
        if let Some(dept) = department_id {
            query = query.filter(Column::DepartmentId.eq(dept));
        }

        let order = match sort.dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        query = query.order_by(order_column(sort.key), order);
        if sort.key != EmployeeSortKey::Id {
            // Stable paging across equal sort values
            query = query.order_by_asc(Column::Id);
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_index()).await?;

        Ok((models.into_iter().map(Employee::from).collect(), total))
    }

    async fn insert(&self, data: NewEmployee) -> AppResult<Employee> {
        let txn = self.db.begin().await?;

        if Self::duplicate_exists(
            &txn,
            &data.first_name,
            &data.last_name,
            &data.middle_name,
            data.department_id,
            None,
        )
        .await?
        {
            return Err(AppError::DuplicateEmployee);
        }

        let active = ActiveModel {
            id: NotSet,
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            middle_name: Set(data.middle_name),
            department_id: Set(data.department_id),
            role_in_company: Set(data.role_in_company),
            hired_at: Set(data.hired_at),
            is_on_holiday: Set(false),
        };

        let model = active
            .insert(&txn)
            .await
            .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateEmployee))?;

        txn.commit().await?;
        Ok(Employee::from(model))
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        let txn = self.db.begin().await?;

        if Self::duplicate_exists(
            &txn,
            &employee.first_name,
            &employee.last_name,
            &employee.middle_name,
            employee.department_id,
            Some(employee.id),
        )
        .await?
        {
            return Err(AppError::DuplicateEmployee);
        }

        let active = ActiveModel {
            id: Set(employee.id),
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            middle_name: Set(employee.middle_name),
            department_id: Set(employee.department_id),
            role_in_company: Set(employee.role_in_company),
            hired_at: Set(employee.hired_at),
            is_on_holiday: Set(employee.is_on_holiday),
        };

        let model = active
            .update(&txn)
            .await
            .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateEmployee))?;

        txn.commit().await?;
        Ok(Employee::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
