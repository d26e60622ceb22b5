//! Holiday ledger service - eligibility enforcement and ledger access.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    next_eligible_start, policy, CreateHolidayRequest, HolidayResponse, NewHoliday, Principal,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Holiday ledger operations
#[async_trait]
pub trait HolidayService: Send + Sync {
    /// Append a ledger entry after checking permissions and the
    /// minimum-gap eligibility rule.
    async fn add_holiday(
        &self,
        principal: &Principal,
        request: CreateHolidayRequest,
    ) -> AppResult<HolidayResponse>;

    /// Ledger for one employee, newest entry first
    async fn list_for_employee(
        &self,
        principal: &Principal,
        employee_id: i32,
    ) -> AppResult<Vec<HolidayResponse>>;
}

/// Concrete implementation of HolidayService using Unit of Work.
pub struct HolidayManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> HolidayManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> HolidayService for HolidayManager<U> {
    async fn add_holiday(
        &self,
        principal: &Principal,
        request: CreateHolidayRequest,
    ) -> AppResult<HolidayResponse> {
        let employee = self
            .uow
            .employees()
            .find_by_id(request.employee_id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;

        if !policy::can_edit(principal, employee.department_id) {
            return Err(AppError::Forbidden);
        }

        let latest = self
            .uow
            .holidays()
            .latest_for_employee(employee.id)
            .await?;

        let earliest = next_eligible_start(latest.map(|h| h.end), employee.hired_at);
        if request.start < earliest {
            if !request.override_ten_month_rule {
                return Err(AppError::EligibilityViolation { earliest });
            }
            // Audit line for every bypass of the minimum-gap rule
            tracing::warn!(
                employee_id = employee.id,
                actor_id = principal.id,
                requested_start = %request.start,
                earliest_eligible = %earliest,
                "minimum-gap rule overridden"
            );
        }

        if request.start >= request.end {
            return Err(AppError::validation("start must be before end"));
        }

        // The store recomputes the floor in its own transaction; the check
        // above can race with a concurrent append to the same ledger
        let holiday = self
            .uow
            .holidays()
            .insert(
                NewHoliday {
                    employee_id: employee.id,
                    start: request.start,
                    end: request.end,
                    created_by_hr: principal.id,
                },
                employee.hired_at,
                !request.override_ten_month_rule,
            )
            .await?;

        Ok(HolidayResponse::from(holiday))
    }

    async fn list_for_employee(
        &self,
        principal: &Principal,
        employee_id: i32,
    ) -> AppResult<Vec<HolidayResponse>> {
        let employee = self
            .uow
            .employees()
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;

        if !policy::can_view(principal, employee.department_id) {
            return Err(AppError::Forbidden);
        }

        let holidays = self.uow.holidays().list_for_employee(employee_id).await?;
        Ok(holidays.into_iter().map(HolidayResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, Holiday, Role};
    use crate::infra::repositories::{MockEmployeeRepository, MockHolidayRepository};
    use crate::infra::test_support::StubUnitOfWork;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hr_principal() -> Principal {
        Principal {
            id: 3,
            username: "hr.lena".to_string(),
            role: Role::Hr,
            department_id: Some(1),
        }
    }

    fn employee_hired(hired_at: NaiveDate) -> Employee {
        Employee {
            id: 10,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            middle_name: None,
            department_id: 1,
            role_in_company: "Engineer".to_string(),
            hired_at,
            is_on_holiday: false,
        }
    }

    fn request(start: NaiveDate, end: NaiveDate, override_rule: bool) -> CreateHolidayRequest {
        CreateHolidayRequest {
            employee_id: 10,
            start,
            end,
            override_ten_month_rule: override_rule,
        }
    }

    fn service_with(
        employees: MockEmployeeRepository,
        holidays: MockHolidayRepository,
    ) -> HolidayManager<StubUnitOfWork> {
        HolidayManager::new(Arc::new(StubUnitOfWork {
            employees: Some(Arc::new(employees)),
            holidays: Some(Arc::new(holidays)),
            ..Default::default()
        }))
    }

    fn expecting_insert(holidays: &mut MockHolidayRepository) {
        holidays.expect_insert().returning(|data, _, _| {
            Ok(Holiday {
                id: 1,
                employee_id: data.employee_id,
                start: data.start,
                end: data.end,
                created_by_hr: data.created_by_hr,
            })
        });
    }

    #[tokio::test]
    async fn holiday_before_floor_is_rejected() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));
        let mut holidays = MockHolidayRepository::new();
        holidays.expect_latest_for_employee().returning(|_| Ok(None));

        let service = service_with(employees, holidays);
        let result = service
            .add_holiday(&hr_principal(), request(date(2024, 10, 1), date(2024, 10, 10), false))
            .await;

        match result {
            Err(AppError::EligibilityViolation { earliest }) => {
                assert_eq!(earliest, date(2024, 11, 1));
            }
            other => panic!("expected eligibility violation, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn holiday_on_floor_date_is_accepted() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));
        let mut holidays = MockHolidayRepository::new();
        holidays.expect_latest_for_employee().returning(|_| Ok(None));
        expecting_insert(&mut holidays);

        let service = service_with(employees, holidays);
        let result = service
            .add_holiday(&hr_principal(), request(date(2024, 11, 1), date(2024, 11, 10), false))
            .await
            .unwrap();

        assert_eq!(result.created_by_hr, 3);
    }

    #[tokio::test]
    async fn override_bypasses_the_floor() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));
        let mut holidays = MockHolidayRepository::new();
        holidays.expect_latest_for_employee().returning(|_| Ok(None));
        // The store must not re-apply the floor the caller just overrode
        holidays
            .expect_insert()
            .withf(|_, _, enforce_floor| !enforce_floor)
            .returning(|data, _, _| {
                Ok(Holiday {
                    id: 1,
                    employee_id: data.employee_id,
                    start: data.start,
                    end: data.end,
                    created_by_hr: data.created_by_hr,
                })
            });

        let service = service_with(employees, holidays);
        let result = service
            .add_holiday(&hr_principal(), request(date(2024, 10, 1), date(2024, 10, 10), true))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn store_keeps_the_floor_check_without_an_override() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));
        let mut holidays = MockHolidayRepository::new();
        holidays.expect_latest_for_employee().returning(|_| Ok(None));
        // A non-override append re-checks the floor transactionally in
        // the store, against the employee's hire date
        holidays
            .expect_insert()
            .withf(|_, hired_at, enforce_floor| {
                *enforce_floor && *hired_at == date(2024, 1, 1)
            })
            .returning(|data, _, _| {
                Ok(Holiday {
                    id: 1,
                    employee_id: data.employee_id,
                    start: data.start,
                    end: data.end,
                    created_by_hr: data.created_by_hr,
                })
            });

        let service = service_with(employees, holidays);
        let result = service
            .add_holiday(&hr_principal(), request(date(2024, 11, 1), date(2024, 11, 10), false))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn floor_moves_to_latest_ledger_entry() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));
        let mut holidays = MockHolidayRepository::new();
        holidays.expect_latest_for_employee().returning(|_| {
            Ok(Some(Holiday {
                id: 1,
                employee_id: 10,
                start: date(2024, 11, 2),
                end: date(2024, 11, 10),
                created_by_hr: 3,
            }))
        });

        let service = service_with(employees, holidays);
        let result = service
            .add_holiday(&hr_principal(), request(date(2025, 6, 1), date(2025, 6, 10), false))
            .await;

        // 2024-11-10 + 10 months = 2025-09-10; June is too early
        match result {
            Err(AppError::EligibilityViolation { earliest }) => {
                assert_eq!(earliest, date(2025, 9, 10));
            }
            other => panic!("expected eligibility violation, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn start_must_precede_end() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));
        let mut holidays = MockHolidayRepository::new();
        holidays.expect_latest_for_employee().returning(|_| Ok(None));

        let service = service_with(employees, holidays);
        let result = service
            .add_holiday(&hr_principal(), request(date(2024, 11, 10), date(2024, 11, 1), false))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn viewer_cannot_add_holidays() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|_| Ok(Some(employee_hired(date(2024, 1, 1)))));

        let viewer = Principal {
            id: 4,
            username: "viewer".to_string(),
            role: Role::Viewer,
            department_id: Some(1),
        };

        let service = service_with(employees, MockHolidayRepository::new());
        let result = service
            .add_holiday(&viewer, request(date(2024, 11, 1), date(2024, 11, 10), false))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
