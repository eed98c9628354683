use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::ShiftKind;

/// One schedule cell as it crosses the boundary: a day, an employee, and a
/// Spanish `notes` string whose substrings encode the shift kind. External
/// editors round-trip schedules through this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignedShift {
    pub date: NaiveDate,
    pub employee_name: String,
    pub service_name: String,
    #[serde(default, with = "shared::time::hhmm")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "shared::time::hhmm")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub notes: String,
}

impl AssignedShift {
    /// Build a shift cell for `kind`, stamping the canonical window for work
    /// kinds and leaving off kinds without one.
    pub fn for_kind(
        date: NaiveDate,
        employee_name: &str,
        service_name: &str,
        kind: ShiftKind,
        notes: String,
    ) -> Self {
        Self {
            date,
            employee_name: employee_name.to_string(),
            service_name: service_name.to_string(),
            start_time: kind.start_time(),
            end_time: kind.end_time(),
            notes,
        }
    }
}
