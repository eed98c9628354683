use shared::{ScoreCategory, Severity};

use super::{ShiftContext, ShiftRule};
use crate::domain::entities::Violation;

/// Rule: a rest streak longer than the service maximum is flagged as a
/// warning (idle staff, not a safety problem).
pub struct MaxConsecutiveRestRule {
    max_days: u32,
    penalty: u32,
}

impl MaxConsecutiveRestRule {
    pub fn new(max_days: u32, penalty: u32) -> Self {
        Self { max_days, penalty }
    }
}

impl ShiftRule for MaxConsecutiveRestRule {
    fn check(&self, context: &ShiftContext<'_>) -> Option<Violation> {
        if !context.kind.is_off() {
            return None;
        }
        let reached = if context.state.is_resting() {
            context.state.consecutive_rest_days + 1
        } else {
            1
        };
        if reached <= self.max_days {
            return None;
        }

        Some(Violation {
            employee_name: Some(context.employee_name.to_string()),
            date: Some(context.date.to_string()),
            shift_type: context.kind.code().to_string(),
            rule: "Exceso Días Descanso Consecutivos".to_string(),
            details: format!(
                "Llega a {} días de descanso consecutivos (máximo {}).",
                reached, self.max_days
            ),
            severity: Severity::Warning,
            category: ScoreCategory::EmployeeWellbeing,
        })
    }

    fn penalty(&self) -> u32 {
        self.penalty
    }

    fn name(&self) -> &'static str {
        "MaxConsecutiveRest"
    }
}
