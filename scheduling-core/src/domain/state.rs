use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use shared::{time, ShiftKind};
use uuid::Uuid;

use crate::domain::entities::Service;

/// Running tally for one employee across one generation attempt (or one
/// evaluation pass). Consecutive counters describe the streak ending
/// yesterday; `apply` folds today's kind in.
#[derive(Debug, Clone, Default)]
pub struct EmployeeState {
    pub consecutive_work_days: u32,
    pub consecutive_rest_days: u32,
    pub shifts_this_month: u32,
    pub last_shift_kind: Option<ShiftKind>,
    /// Absolute end instant of the last actual work shift; night shifts end
    /// on the next calendar day.
    pub last_work_end: Option<NaiveDateTime>,
    pub complete_weekends_off_this_month: u32,
}

impl EmployeeState {
    /// Fold one day's kind into the tally. The seeder, the engine and the
    /// evaluator all go through this single transition so their counters
    /// cannot disagree.
    pub fn apply(&mut self, kind: ShiftKind, date: NaiveDate) {
        if kind.is_work() {
            self.consecutive_work_days = match self.last_shift_kind {
                Some(previous) if previous.is_work() => self.consecutive_work_days + 1,
                _ => 1,
            };
            self.consecutive_rest_days = 0;
            if let Some(end) = time::shift_end_instant(date, kind) {
                self.last_work_end = Some(end);
            }
            self.shifts_this_month += 1;
        } else {
            self.consecutive_rest_days = match self.last_shift_kind {
                Some(previous) if previous.is_work() => 1,
                _ => self.consecutive_rest_days + 1,
            };
            self.consecutive_work_days = 0;
        }
        self.last_shift_kind = Some(kind);
    }

    /// Hours of rest accumulated before starting `kind` on `date`. `None`
    /// when no prior work shift is on record.
    pub fn rest_hours_before(&self, date: NaiveDate, kind: ShiftKind) -> Option<f64> {
        let prior_end = self.last_work_end?;
        let start = time::shift_start_instant(date, kind)?;
        Some(time::rest_hours_between(prior_end, start))
    }

    /// Whether starting `kind` on `date` leaves at least `min_rest_hours`
    /// since the last work shift ended. Trivially true with no prior shift.
    pub fn satisfies_rest_window(&self, date: NaiveDate, kind: ShiftKind, min_rest_hours: f64) -> bool {
        self.rest_hours_before(date, kind)
            .map_or(true, |rest| rest >= min_rest_hours)
    }

    /// An employee whose streak ending yesterday was rest (or who has no
    /// recorded streak at all).
    pub fn is_resting(&self) -> bool {
        self.consecutive_work_days == 0
    }
}

/// Staff still needed today for each work kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemainingNeed {
    pub morning: u32,
    pub afternoon: u32,
    pub night: u32,
}

impl RemainingNeed {
    pub fn for_day(service: &Service, weekend_or_holiday: bool) -> Self {
        Self {
            morning: service.demand_for(ShiftKind::M, weekend_or_holiday),
            afternoon: service.demand_for(ShiftKind::T, weekend_or_holiday),
            night: service.demand_for(ShiftKind::N, weekend_or_holiday),
        }
    }

    pub fn get(&self, kind: ShiftKind) -> u32 {
        match kind {
            ShiftKind::M => self.morning,
            ShiftKind::T => self.afternoon,
            ShiftKind::N => self.night,
            _ => 0,
        }
    }

    /// Consume one seat for `kind`; stays at zero once demand is covered.
    pub fn take_one(&mut self, kind: ShiftKind) {
        let slot = match kind {
            ShiftKind::M => &mut self.morning,
            ShiftKind::T => &mut self.afternoon,
            ShiftKind::N => &mut self.night,
            _ => return,
        };
        *slot = slot.saturating_sub(1);
    }
}

/// Mutable per-day world the assignment layers borrow in turn. A layer must
/// not touch an employee another layer already processed.
#[derive(Debug, Default)]
pub struct DayBoard {
    pub remaining_need: RemainingNeed,
    /// Employees assigned anything today.
    pub processed: HashSet<Uuid>,
    /// Employees assigned a work kind today.
    pub assigned_work: HashSet<Uuid>,
}

impl DayBoard {
    pub fn for_day(service: &Service, weekend_or_holiday: bool) -> Self {
        Self {
            remaining_need: RemainingNeed::for_day(service, weekend_or_holiday),
            processed: HashSet::new(),
            assigned_work: HashSet::new(),
        }
    }

    pub fn is_processed(&self, employee_id: Uuid) -> bool {
        self.processed.contains(&employee_id)
    }

    pub fn mark(&mut self, employee_id: Uuid, kind: ShiftKind) {
        self.processed.insert(employee_id);
        if kind.is_work() {
            self.assigned_work.insert(employee_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    #[test]
    fn test_work_streak_accumulates() {
        let mut state = EmployeeState::default();
        state.apply(ShiftKind::M, day(3));
        state.apply(ShiftKind::T, day(4));
        assert_eq!(state.consecutive_work_days, 2);
        assert_eq!(state.consecutive_rest_days, 0);
        assert_eq!(state.shifts_this_month, 2);

        state.apply(ShiftKind::D, day(5));
        assert_eq!(state.consecutive_work_days, 0);
        assert_eq!(state.consecutive_rest_days, 1);

        state.apply(ShiftKind::F, day(6));
        assert_eq!(state.consecutive_rest_days, 2);
    }

    #[test]
    fn test_rest_streak_survives_unknown_start() {
        // no prior kind on record: rest keeps accumulating
        let mut state = EmployeeState::default();
        state.apply(ShiftKind::D, day(1));
        state.apply(ShiftKind::D, day(2));
        assert_eq!(state.consecutive_rest_days, 2);
    }

    #[test]
    fn test_night_shift_end_recorded_next_day() {
        let mut state = EmployeeState::default();
        state.apply(ShiftKind::N, day(10));
        let end = state.last_work_end.unwrap();
        assert_eq!(end.date(), day(11));

        // starting the next morning leaves no rest at all
        assert_eq!(state.rest_hours_before(day(11), ShiftKind::M), Some(0.0));
        assert!(!state.satisfies_rest_window(day(11), ShiftKind::M, 12.0));
        assert!(state.satisfies_rest_window(day(12), ShiftKind::M, 12.0));
    }

    #[test]
    fn test_rest_window_trivially_ok_without_history() {
        let state = EmployeeState::default();
        assert!(state.satisfies_rest_window(day(1), ShiftKind::M, 12.0));
    }

    #[test]
    fn test_remaining_need_saturates_at_zero() {
        let mut need = RemainingNeed {
            morning: 1,
            afternoon: 0,
            night: 0,
        };
        need.take_one(ShiftKind::M);
        need.take_one(ShiftKind::M);
        assert_eq!(need.get(ShiftKind::M), 0);
    }
}
