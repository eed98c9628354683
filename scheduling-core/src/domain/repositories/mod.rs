use std::collections::HashSet;

use chrono::NaiveDate;
use shared::DomainResult;
use uuid::Uuid;

use crate::domain::entities::AssignedShift;

/// Read-only source of holiday dates for a scheduling period.
#[cfg_attr(test, mockall::automock)]
pub trait HolidayProvider: Send + Sync {
    fn holidays_for(&self, year: i32, month: u32) -> DomainResult<HashSet<NaiveDate>>;
}

/// Read-only access to stored schedules, keyed by `<year>-<month>-<serviceId>`.
/// The core only ever reads through this interface; publication stays with
/// the caller.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleStore: Send + Sync {
    /// The published schedule for the given month, if one exists.
    fn published_shifts(
        &self,
        year: i32,
        month: u32,
        service_id: Uuid,
    ) -> DomainResult<Option<Vec<AssignedShift>>>;
}
