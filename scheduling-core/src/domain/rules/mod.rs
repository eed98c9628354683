pub mod consecutive_rest_rule;
pub mod consecutive_work_rule;
pub mod rest_before_work_rule;
pub mod rest_between_shifts_rule;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::ShiftKind;

use crate::domain::entities::{ConsecutivenessRules, Violation};
use crate::domain::state::EmployeeState;

pub use consecutive_rest_rule::MaxConsecutiveRestRule;
pub use consecutive_work_rule::MaxConsecutiveWorkRule;
pub use rest_before_work_rule::RestBeforeWorkRule;
pub use rest_between_shifts_rule::RestBetweenShiftsRule;

/// Penalty points deducted per rule breach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScorePenalties {
    pub rest_between_shifts: u32,
    pub rest_before_work: u32,
    pub max_consecutive_work: u32,
    pub max_consecutive_off: u32,
    pub staffing_shortage_per_missing: u32,
    pub weekend_target_not_met_per_weekend: u32,
    /// Cap on the weekend-target penalty per employee.
    pub max_weekend_target_penalty: u32,
}

impl Default for ScorePenalties {
    fn default() -> Self {
        Self {
            rest_between_shifts: 10,
            rest_before_work: 5,
            max_consecutive_work: 5,
            max_consecutive_off: 1,
            staffing_shortage_per_missing: 5,
            weekend_target_not_met_per_weekend: 2,
            max_weekend_target_penalty: 10,
        }
    }
}

/// Run-level rule configuration. Consecutiveness limits live on the service
/// (`ConsecutivenessRules`); this carries everything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingRules {
    pub min_rest_hours_between_shifts: f64,
    pub default_target_complete_weekends_off: u32,
    #[serde(default)]
    pub penalties: ScorePenalties,
    /// Seed for the demand-coverage tie-break; set it to make runs
    /// reproducible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            min_rest_hours_between_shifts: 12.0,
            default_target_complete_weekends_off: 1,
            penalties: ScorePenalties::default(),
            rng_seed: None,
        }
    }
}

/// Snapshot handed to each rule: the shift being replayed plus the
/// employee's state before the shift is folded in.
#[derive(Debug)]
pub struct ShiftContext<'a> {
    pub employee_name: &'a str,
    pub date: NaiveDate,
    pub kind: ShiftKind,
    /// Start instant, present for work kinds.
    pub start: Option<NaiveDateTime>,
    pub state: &'a EmployeeState,
}

pub trait ShiftRule: Send + Sync {
    /// Check the shift against this rule; `None` means clean.
    fn check(&self, context: &ShiftContext<'_>) -> Option<Violation>;

    /// Points deducted when the rule fires.
    fn penalty(&self) -> u32;

    fn name(&self) -> &'static str;
}

/// The per-shift rule set the evaluator replays every (employee, day) cell
/// through, wired from the service limits and the run configuration.
pub fn standard_rules(
    consecutiveness: &ConsecutivenessRules,
    config: &SchedulingRules,
) -> Vec<Box<dyn ShiftRule>> {
    vec![
        Box::new(RestBetweenShiftsRule::new(
            config.min_rest_hours_between_shifts,
            config.penalties.rest_between_shifts,
        )),
        Box::new(RestBeforeWorkRule::new(
            consecutiveness.min_consecutive_days_off_required_before_work,
            config.penalties.rest_before_work,
        )),
        Box::new(MaxConsecutiveWorkRule::new(
            consecutiveness.max_consecutive_work_days,
            config.penalties.max_consecutive_work,
        )),
        Box::new(MaxConsecutiveRestRule::new(
            consecutiveness.max_consecutive_days_off,
            config.penalties.max_consecutive_off,
        )),
    ]
}
