use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{time, ShiftKind};
use uuid::Uuid;

/// Whole-employee scheduling policy; overrides per-day preferences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WorkPattern {
    StandardRotation,
    MondayToFridayMorning,
    MondayToFridayAfternoon,
}

impl WorkPattern {
    /// The work kind a fixed Monday-to-Friday pattern places on a normal
    /// weekday. Standard rotation has no fixed kind.
    pub fn weekday_shift(&self) -> Option<ShiftKind> {
        match self {
            WorkPattern::MondayToFridayMorning => Some(ShiftKind::M),
            WorkPattern::MondayToFridayAfternoon => Some(ShiftKind::T),
            WorkPattern::StandardRotation => None,
        }
    }
}

/// What a fixed weekly day means for the employee.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FixedShiftTiming {
    #[default]
    None,
    RestDay,
    Morning,
    Afternoon,
    Night,
}

impl FixedShiftTiming {
    pub fn shift_kind(&self) -> Option<ShiftKind> {
        match self {
            FixedShiftTiming::Morning => Some(ShiftKind::M),
            FixedShiftTiming::Afternoon => Some(ShiftKind::T),
            FixedShiftTiming::Night => Some(ShiftKind::N),
            FixedShiftTiming::None | FixedShiftTiming::RestDay => None,
        }
    }
}

/// An employee-declared off period that blocks scheduling on those days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixedAssignment {
    /// One of D, LAO or LM.
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    pub start_date: NaiveDate,
    /// Inclusive; a missing end means a single day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FixedAssignment {
    pub fn covers(&self, date: NaiveDate) -> bool {
        let end = self.end_date.unwrap_or(self.start_date);
        self.start_date <= date && date <= end
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePreferences {
    #[serde(default)]
    pub eligible_for_day_off_after_duty: bool,
    #[serde(default)]
    pub prefers_weekend_work: bool,
    /// Weekday names; matched after normalization (lunes..domingo).
    #[serde(default)]
    pub fixed_weekly_shift_days: HashSet<String>,
    #[serde(default)]
    pub fixed_weekly_shift_timing: FixedShiftTiming,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_pattern: Option<WorkPattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub service_ids: HashSet<Uuid>,
    #[serde(default)]
    pub preferences: EmployeePreferences,
    /// Ordered list; the first match for a day wins.
    #[serde(default)]
    pub fixed_assignments: Vec<FixedAssignment>,
}

impl Employee {
    pub fn is_assigned_to(&self, service_id: Uuid) -> bool {
        self.service_ids.contains(&service_id)
    }

    /// The fixed absence covering `date`, if any.
    pub fn fixed_absence_on(&self, date: NaiveDate) -> Option<&FixedAssignment> {
        self.fixed_assignments.iter().find(|fa| fa.covers(date))
    }

    /// Whether `date`'s weekday is one of the employee's fixed weekly days.
    pub fn has_fixed_day(&self, weekday_key: &str) -> bool {
        self.preferences
            .fixed_weekly_shift_days
            .iter()
            .any(|day| time::normalize_weekday_name(day) == weekday_key)
    }

    /// Employees on a standard rotation (or with no pattern at all) follow
    /// their fixed weekly preferences; fixed patterns override them.
    pub fn follows_weekly_preferences(&self) -> bool {
        matches!(
            self.preferences.work_pattern,
            None | Some(WorkPattern::StandardRotation)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            service_ids: HashSet::new(),
            preferences: EmployeePreferences::default(),
            fixed_assignments: Vec::new(),
        }
    }

    #[test]
    fn test_fixed_assignment_range_is_inclusive() {
        let mut emp = employee();
        emp.fixed_assignments.push(FixedAssignment {
            kind: ShiftKind::Lao,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 7),
            description: Some("Vacaciones".to_string()),
        });

        assert!(emp
            .fixed_absence_on(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
            .is_some());
        assert!(emp
            .fixed_absence_on(NaiveDate::from_ymd_opt(2025, 2, 7).unwrap())
            .is_some());
        assert!(emp
            .fixed_absence_on(NaiveDate::from_ymd_opt(2025, 2, 8).unwrap())
            .is_none());
    }

    #[test]
    fn test_single_day_fixed_assignment() {
        let mut emp = employee();
        emp.fixed_assignments.push(FixedAssignment {
            kind: ShiftKind::Lm,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            end_date: None,
            description: None,
        });

        assert!(emp
            .fixed_absence_on(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap())
            .is_some());
        assert!(emp
            .fixed_absence_on(NaiveDate::from_ymd_opt(2025, 2, 11).unwrap())
            .is_none());
    }

    #[test]
    fn test_fixed_day_matching_normalizes_accents() {
        let mut emp = employee();
        emp.preferences
            .fixed_weekly_shift_days
            .insert("Miércoles".to_string());

        assert!(emp.has_fixed_day("miercoles"));
        assert!(!emp.has_fixed_day("jueves"));
    }

    #[test]
    fn test_pattern_overrides_weekly_preferences() {
        let mut emp = employee();
        assert!(emp.follows_weekly_preferences());
        emp.preferences.work_pattern = Some(WorkPattern::StandardRotation);
        assert!(emp.follows_weekly_preferences());
        emp.preferences.work_pattern = Some(WorkPattern::MondayToFridayMorning);
        assert!(!emp.follows_weekly_preferences());
    }
}
