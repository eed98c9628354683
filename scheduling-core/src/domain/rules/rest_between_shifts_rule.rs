use shared::{time, ScoreCategory, Severity};

use super::{ShiftContext, ShiftRule};
use crate::domain::entities::Violation;

/// Rule: a work shift must start at least the configured number of hours
/// after the previous work shift ended. Night shifts end the next calendar
/// day, so the comparison runs on absolute instants.
pub struct RestBetweenShiftsRule {
    min_rest_hours: f64,
    penalty: u32,
}

impl RestBetweenShiftsRule {
    pub fn new(min_rest_hours: f64, penalty: u32) -> Self {
        Self {
            min_rest_hours,
            penalty,
        }
    }
}

impl ShiftRule for RestBetweenShiftsRule {
    fn check(&self, context: &ShiftContext<'_>) -> Option<Violation> {
        if !context.kind.is_work() {
            return None;
        }
        let start = context.start?;
        let prior_end = context.state.last_work_end?;

        let rest = time::rest_hours_between(prior_end, start);
        if rest >= self.min_rest_hours {
            return None;
        }

        Some(Violation {
            employee_name: Some(context.employee_name.to_string()),
            date: Some(context.date.to_string()),
            shift_type: context.kind.code().to_string(),
            rule: "Violación Descanso Mínimo entre Turnos".to_string(),
            details: format!(
                "Solo {:.1} h de descanso desde el fin del último turno (mínimo {:.0} h).",
                rest.max(0.0),
                self.min_rest_hours
            ),
            severity: Severity::Error,
            category: ScoreCategory::EmployeeWellbeing,
        })
    }

    fn penalty(&self) -> u32 {
        self.penalty
    }

    fn name(&self) -> &'static str {
        "RestBetweenShifts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ShiftKind;

    use crate::domain::state::EmployeeState;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn context<'a>(
        state: &'a EmployeeState,
        date: NaiveDate,
        kind: ShiftKind,
    ) -> ShiftContext<'a> {
        ShiftContext {
            employee_name: "Ana",
            date,
            kind,
            start: time::shift_start_instant(date, kind),
            state,
        }
    }

    #[test]
    fn test_morning_after_night_violates() {
        let rule = RestBetweenShiftsRule::new(12.0, 10);
        let mut state = EmployeeState::default();
        state.apply(ShiftKind::N, day(10)); // ends 2025-02-11 07:00

        let violation = rule.check(&context(&state, day(11), ShiftKind::M));
        let violation = violation.expect("0 h of rest must violate");
        assert_eq!(violation.severity, Severity::Error);
        assert_eq!(violation.category, ScoreCategory::EmployeeWellbeing);
        assert_eq!(violation.rule, "Violación Descanso Mínimo entre Turnos");
    }

    #[test]
    fn test_full_day_of_rest_is_clean() {
        let rule = RestBetweenShiftsRule::new(12.0, 10);
        let mut state = EmployeeState::default();
        state.apply(ShiftKind::M, day(10)); // ends 15:00

        // next morning starts 07:00, 16 h later
        assert!(rule.check(&context(&state, day(11), ShiftKind::M)).is_none());
    }

    #[test]
    fn test_off_kinds_and_blank_history_are_clean() {
        let rule = RestBetweenShiftsRule::new(12.0, 10);
        let state = EmployeeState::default();
        assert!(rule.check(&context(&state, day(3), ShiftKind::M)).is_none());
        assert!(rule.check(&context(&state, day(3), ShiftKind::D)).is_none());
    }
}
