use shared::{ScoreCategory, Severity};

use super::{ShiftContext, ShiftRule};
use crate::domain::entities::Violation;

/// Rule: an employee coming off a rest streak must have rested at least the
/// configured number of days before starting work again.
pub struct RestBeforeWorkRule {
    min_days_off_before_work: u32,
    penalty: u32,
}

impl RestBeforeWorkRule {
    pub fn new(min_days_off_before_work: u32, penalty: u32) -> Self {
        Self {
            min_days_off_before_work,
            penalty,
        }
    }
}

impl ShiftRule for RestBeforeWorkRule {
    fn check(&self, context: &ShiftContext<'_>) -> Option<Violation> {
        if !context.kind.is_work() {
            return None;
        }
        // only applies when the shift starts a new work block
        if !context.state.is_resting() {
            return None;
        }
        if context.state.consecutive_rest_days >= self.min_days_off_before_work {
            return None;
        }

        Some(Violation {
            employee_name: Some(context.employee_name.to_string()),
            date: Some(context.date.to_string()),
            shift_type: context.kind.code().to_string(),
            rule: "Violación Mínimo Descanso Antes de Trabajar".to_string(),
            details: format!(
                "Comienza a trabajar con {} día(s) de descanso previo (mínimo {}).",
                context.state.consecutive_rest_days, self.min_days_off_before_work
            ),
            severity: Severity::Error,
            category: ScoreCategory::ServiceRule,
        })
    }

    fn penalty(&self) -> u32 {
        self.penalty
    }

    fn name(&self) -> &'static str {
        "RestBeforeWork"
    }
}
