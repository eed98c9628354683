use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use shared::ShiftKind;
use uuid::Uuid;

use crate::domain::entities::{AssignedShift, ConsecutivenessRules, Employee};
use crate::domain::notes;
use crate::domain::state::EmployeeState;

/// Days replayed before day 1 so continuity rules survive the month
/// boundary: enough to saturate both streak limits, at least a week.
fn lookback_days(rules: &ConsecutivenessRules) -> i64 {
    rules
        .max_consecutive_work_days
        .max(rules.max_consecutive_days_off)
        .max(7) as i64
}

/// Seed one state per employee by replaying the tail of the previous month.
/// Days without a record count as rest, so an absent previous month seeds an
/// all-rest state.
pub fn seed_employee_states(
    roster: &[&Employee],
    previous_shifts: Option<&[AssignedShift]>,
    rules: &ConsecutivenessRules,
    first_day: NaiveDate,
) -> HashMap<Uuid, EmployeeState> {
    let mut by_day: HashMap<(&str, NaiveDate), &AssignedShift> = HashMap::new();
    for shift in previous_shifts.unwrap_or_default() {
        by_day.insert((shift.employee_name.as_str(), shift.date), shift);
    }

    let lookback = lookback_days(rules);
    let mut states = HashMap::with_capacity(roster.len());

    for employee in roster {
        let mut state = EmployeeState::default();
        for offset in (1..=lookback).rev() {
            let date = first_day - Duration::days(offset);
            let kind = by_day
                .get(&(employee.name.as_str(), date))
                .map(|shift| notes::classify(&shift.notes, shift.start_time))
                .unwrap_or(ShiftKind::D);
            state.apply(kind, date);
        }
        // the walk only establishes continuity; month tallies start at zero
        state.shifts_this_month = 0;
        state.complete_weekends_off_this_month = 0;
        states.insert(employee.id, state);
    }

    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::domain::entities::EmployeePreferences;

    fn employee(name: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            service_ids: HashSet::new(),
            preferences: EmployeePreferences::default(),
            fixed_assignments: Vec::new(),
        }
    }

    fn first_of_february() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[test]
    fn test_absent_history_seeds_all_rest() {
        let ana = employee("Ana");
        let roster = [&ana];
        let states = seed_employee_states(
            &roster,
            None,
            &ConsecutivenessRules::default(),
            first_of_february(),
        );

        let state = &states[&ana.id];
        assert_eq!(state.consecutive_work_days, 0);
        assert_eq!(state.consecutive_rest_days, 7);
        assert_eq!(state.shifts_this_month, 0);
        assert!(state.last_work_end.is_none());
    }

    #[test]
    fn test_trailing_work_streak_carries_over() {
        let ana = employee("Ana");
        let roster = [&ana];

        // worked the last three days of January
        let previous: Vec<AssignedShift> = (29..=31)
            .map(|day| {
                AssignedShift::for_kind(
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    "Ana",
                    "Guardia",
                    ShiftKind::M,
                    "Turno Mañana (M)".to_string(),
                )
            })
            .collect();

        let states = seed_employee_states(
            &roster,
            Some(&previous),
            &ConsecutivenessRules::default(),
            first_of_february(),
        );

        let state = &states[&ana.id];
        assert_eq!(state.consecutive_work_days, 3);
        assert_eq!(state.consecutive_rest_days, 0);
        assert_eq!(state.shifts_this_month, 0);
        let end = state.last_work_end.expect("end of the January 31 shift");
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_night_end_instant_crosses_into_the_month() {
        let ana = employee("Ana");
        let roster = [&ana];

        let previous = vec![AssignedShift::for_kind(
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            "Ana",
            "Guardia",
            ShiftKind::N,
            "Turno Noche (N)".to_string(),
        )];

        let states = seed_employee_states(
            &roster,
            Some(&previous),
            &ConsecutivenessRules::default(),
            first_of_february(),
        );

        let end = states[&ana.id].last_work_end.expect("night shift end");
        assert_eq!(end.date(), first_of_february());
    }

    #[test]
    fn test_lookback_covers_the_larger_streak_limit() {
        let rules = ConsecutivenessRules {
            max_consecutive_work_days: 10,
            ..ConsecutivenessRules::default()
        };
        assert_eq!(lookback_days(&rules), 10);
        assert_eq!(lookback_days(&ConsecutivenessRules::default()), 7);
    }
}
