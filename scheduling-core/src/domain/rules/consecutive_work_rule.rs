use shared::{ScoreCategory, Severity};

use super::{ShiftContext, ShiftRule};
use crate::domain::entities::Violation;

/// Rule: a work streak must not exceed the service's hard maximum.
pub struct MaxConsecutiveWorkRule {
    max_days: u32,
    penalty: u32,
}

impl MaxConsecutiveWorkRule {
    pub fn new(max_days: u32, penalty: u32) -> Self {
        Self { max_days, penalty }
    }
}

impl ShiftRule for MaxConsecutiveWorkRule {
    fn check(&self, context: &ShiftContext<'_>) -> Option<Violation> {
        if !context.kind.is_work() {
            return None;
        }
        let reached = if context.state.is_resting() {
            1
        } else {
            context.state.consecutive_work_days + 1
        };
        if reached <= self.max_days {
            return None;
        }

        Some(Violation {
            employee_name: Some(context.employee_name.to_string()),
            date: Some(context.date.to_string()),
            shift_type: context.kind.code().to_string(),
            rule: "Exceso Días Trabajo Consecutivos".to_string(),
            details: format!(
                "Llega a {} días de trabajo consecutivos (máximo {}).",
                reached, self.max_days
            ),
            severity: Severity::Error,
            category: ScoreCategory::ServiceRule,
        })
    }

    fn penalty(&self) -> u32 {
        self.penalty
    }

    fn name(&self) -> &'static str {
        "MaxConsecutiveWork"
    }
}
