//! Holiday ledger entries and the eligibility arithmetic.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::HOLIDAY_GAP_MONTHS;

/// Holiday ledger entry. Append-only; never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub id: i32,
    pub employee_id: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// The user account that recorded this entry
    pub created_by_hr: i32,
}

/// Data for appending a new ledger entry
#[derive(Debug, Clone)]
pub struct NewHoliday {
    pub employee_id: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub created_by_hr: i32,
}

/// Holiday creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHolidayRequest {
    pub employee_id: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Skip the minimum-gap eligibility check (audited)
    #[serde(rename = "override10MonthRule", default)]
    pub override_ten_month_rule: bool,
}

/// Holiday response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HolidayResponse {
    pub id: i32,
    pub employee_id: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub created_by_hr: i32,
}

impl From<Holiday> for HolidayResponse {
    fn from(h: Holiday) -> Self {
        Self {
            id: h.id,
            employee_id: h.employee_id,
            start: h.start,
            end: h.end,
            created_by_hr: h.created_by_hr,
        }
    }
}

/// Earliest date a new holiday may start.
///
/// The anchor is the end of the most recent ledger entry, or the hire
/// date if the ledger is empty; the floor is the anchor plus the
/// configured gap in calendar months. Month addition clamps to the last
/// valid day of the target month (e.g. Jan 31 + 1 month = Feb 28/29).
pub fn next_eligible_start(last_end: Option<NaiveDate>, hired_at: NaiveDate) -> NaiveDate {
    let anchor = last_end.unwrap_or(hired_at);
    anchor
        .checked_add_months(Months::new(HOLIDAY_GAP_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}
