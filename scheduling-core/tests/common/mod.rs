use std::collections::HashSet;

use chrono::NaiveDate;
use scheduling_core::domain::notes;
use scheduling_core::{
    AssignedShift, ConsecutivenessRules, Employee, EmployeePreferences, SchedulePeriod,
    SchedulingRules, Service, ShiftDemand, ShiftKind, StaffingNeeds,
};
use uuid::Uuid;

/// A day service with the same morning/afternoon demand on every day class
/// and night shifts disabled.
pub fn weekday_service(morning: u32, afternoon: u32) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: "Guardia General".to_string(),
        enable_night_shift: false,
        staffing_needs: StaffingNeeds {
            morning: ShiftDemand {
                weekday: morning,
                weekend_or_holiday: morning,
            },
            afternoon: ShiftDemand {
                weekday: afternoon,
                weekend_or_holiday: afternoon,
            },
            night: ShiftDemand::default(),
        },
        consecutiveness_rules: ConsecutivenessRules::default(),
        target_complete_weekends_off: Some(0),
    }
}

pub fn rotation_employee(name: &str, service_id: Uuid) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        name: name.to_string(),
        service_ids: [service_id].into_iter().collect(),
        preferences: EmployeePreferences::default(),
        fixed_assignments: Vec::new(),
    }
}

pub fn seeded_rules(seed: u64) -> SchedulingRules {
    SchedulingRules {
        rng_seed: Some(seed),
        ..SchedulingRules::default()
    }
}

pub fn february() -> SchedulePeriod {
    SchedulePeriod::new(2025, 2).unwrap()
}

pub fn no_holidays() -> HashSet<NaiveDate> {
    HashSet::new()
}

/// A previous-month tail where everyone worked January 31: seeding leaves a
/// short work streak instead of a long idle one, so a feasible roster can
/// reach a clean score.
pub fn working_january_tail(names: &[&str]) -> Vec<AssignedShift> {
    names
        .iter()
        .map(|name| {
            AssignedShift::for_kind(
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                name,
                "Guardia General",
                ShiftKind::M,
                "Turno Mañana (M)".to_string(),
            )
        })
        .collect()
}

pub fn kind_of(shifts: &[AssignedShift], name: &str, day: u32) -> ShiftKind {
    let date = NaiveDate::from_ymd_opt(2025, 2, day).unwrap();
    let shift = shifts
        .iter()
        .find(|s| s.employee_name == name && s.date == date)
        .unwrap_or_else(|| panic!("missing cell for {name} on day {day}"));
    notes::classify(&shift.notes, shift.start_time)
}
