//! In-memory fake repositories for service-level scenario tests.
//!
//! The fakes enforce the same uniqueness rules as the real schema
//! (department names, usernames, the employee identity index) so the
//! services see equivalent behavior without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use evms::domain::{
    canonical_middle_name, next_eligible_start, Department, Employee, EmployeeSort,
    EmployeeSortKey, Holiday, NewEmployee, NewHoliday, Role, SortDir, User, UserFilter,
};
use evms::errors::{AppError, AppResult};
use evms::infra::{
    DepartmentRepository, EmployeeRepository, HolidayRepository, UnitOfWork, UserRepository,
};
use evms::types::PaginationParams;

#[derive(Default)]
pub struct FakeDepartmentRepository {
    rows: Mutex<Vec<Department>>,
    next_id: Mutex<i32>,
}

impl FakeDepartmentRepository {
    pub fn seed(&self, name: &str) -> i32 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = *next;
        self.rows.lock().unwrap().push(Department {
            id,
            name: name.to_string(),
        });
        id
    }
}

#[async_trait]
impl DepartmentRepository for FakeDepartmentRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Department>> {
        Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert(&self, name: String) -> AppResult<Department> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|d| d.name == name) {
            return Err(AppError::DuplicateDepartment);
        }
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let department = Department { id: *next, name };
        rows.push(department.clone());
        Ok(department)
    }
}

#[derive(Default)]
pub struct FakeUserRepository {
    rows: Mutex<Vec<User>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut rows: Vec<User> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| filter.role.map_or(true, |r| u.role == r))
            .filter(|u| {
                filter
                    .department_id
                    .map_or(true, |d| u.department_id == Some(d))
            })
            .filter(|u| {
                filter
                    .username_contains
                    .as_deref()
                    .map_or(true, |s| u.username.contains(s))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(rows)
    }

    async fn insert(
        &self,
        username: String,
        password_hash: String,
        role: Role,
        department_id: Option<i32>,
    ) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateUsername);
        }
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let user = User {
            id: *next,
            username,
            password_hash,
            role,
            department_id,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(AppError::DuplicateUsername);
        }
        let row = rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AppError::NotFound("User"))?;
        *row = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct FakeEmployeeRepository {
    rows: Mutex<Vec<Employee>>,
    next_id: Mutex<i32>,
}

impl FakeEmployeeRepository {
    fn is_duplicate(rows: &[Employee], candidate: &Employee) -> bool {
        rows.iter().any(|e| {
            e.id != candidate.id
                && e.first_name == candidate.first_name
                && e.last_name == candidate.last_name
                && canonical_middle_name(&e.middle_name)
                    == canonical_middle_name(&candidate.middle_name)
                && e.department_id == candidate.department_id
        })
    }
}

#[async_trait]
impl EmployeeRepository for FakeEmployeeRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn list(
        &self,
        department_id: Option<i32>,
        page: &PaginationParams,
        sort: EmployeeSort,
    ) -> AppResult<(Vec<Employee>, u64)> {
        let mut rows: Vec<Employee> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| department_id.map_or(true, |d| e.department_id == d))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match sort.key {
                EmployeeSortKey::Id => a.id.cmp(&b.id),
                EmployeeSortKey::FirstName => a.first_name.cmp(&b.first_name),
                EmployeeSortKey::LastName => a.last_name.cmp(&b.last_name),
                EmployeeSortKey::HiredAt => a.hired_at.cmp(&b.hired_at),
                EmployeeSortKey::DepartmentId => a.department_id.cmp(&b.department_id),
                EmployeeSortKey::RoleInCompany => a.role_in_company.cmp(&b.role_in_company),
            };
            let ordering = match sort.dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            };
            ordering.then(a.id.cmp(&b.id))
        });

        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((items, total))
    }

    async fn insert(&self, data: NewEmployee) -> AppResult<Employee> {
        let mut rows = self.rows.lock().unwrap();
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let employee = Employee {
            id: *next,
            first_name: data.first_name,
            last_name: data.last_name,
            middle_name: data.middle_name,
            department_id: data.department_id,
            role_in_company: data.role_in_company,
            hired_at: data.hired_at,
            is_on_holiday: false,
        };
        if Self::is_duplicate(&rows, &employee) {
            return Err(AppError::DuplicateEmployee);
        }
        rows.push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: Employee) -> AppResult<Employee> {
        let mut rows = self.rows.lock().unwrap();
        if Self::is_duplicate(&rows, &employee) {
            return Err(AppError::DuplicateEmployee);
        }
        let row = rows
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or(AppError::NotFound("Employee"))?;
        *row = employee.clone();
        Ok(employee)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct FakeHolidayRepository {
    rows: Mutex<Vec<Holiday>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl HolidayRepository for FakeHolidayRepository {
    async fn latest_for_employee(&self, employee_id: i32) -> AppResult<Option<Holiday>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.employee_id == employee_id)
            .max_by_key(|h| (h.end, h.id))
            .cloned())
    }

    async fn list_for_employee(&self, employee_id: i32) -> AppResult<Vec<Holiday>> {
        let mut rows: Vec<Holiday> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.end, b.id).cmp(&(a.end, a.id)));
        Ok(rows)
    }

    async fn insert(
        &self,
        data: NewHoliday,
        hired_at: NaiveDate,
        enforce_floor: bool,
    ) -> AppResult<Holiday> {
        let mut rows = self.rows.lock().unwrap();
        if enforce_floor {
            let last_end = rows
                .iter()
                .filter(|h| h.employee_id == data.employee_id)
                .map(|h| h.end)
                .max();
            let earliest = next_eligible_start(last_end, hired_at);
            if data.start < earliest {
                return Err(AppError::EligibilityViolation { earliest });
            }
        }
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let holiday = Holiday {
            id: *next,
            employee_id: data.employee_id,
            start: data.start,
            end: data.end,
            created_by_hr: data.created_by_hr,
        };
        rows.push(holiday.clone());
        Ok(holiday)
    }
}

/// Unit of Work over the in-memory fakes. Tests keep the concrete
/// handles for seeding.
#[derive(Default)]
pub struct FakeUnitOfWork {
    pub departments: Arc<FakeDepartmentRepository>,
    pub users: Arc<FakeUserRepository>,
    pub employees: Arc<FakeEmployeeRepository>,
    pub holidays: Arc<FakeHolidayRepository>,
}

impl UnitOfWork for FakeUnitOfWork {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn holidays(&self) -> Arc<dyn HolidayRepository> {
        self.holidays.clone()
    }
}
