//! Monthly shift scheduler core: a constraint-driven assignment engine and
//! its deterministic evaluator.
//!
//! The two entry points mirror each other: [`generate_schedule`] produces a
//! full monthly assignment and scores it, [`evaluate_schedule`] replays any
//! assignment (generated or hand-edited) against the same rules. Feeding a
//! generated schedule back through the evaluator reproduces its score,
//! breakdown and violations.

pub mod domain;

use std::collections::HashSet;

use chrono::NaiveDate;

pub use domain::entities::{
    AssignedShift, ConsecutivenessRules, Employee, EmployeePreferences, FixedAssignment,
    FixedShiftTiming, SchedulePeriod, ScheduleOutcome, ScoreBreakdown, Service, ShiftDemand,
    StaffingNeeds, Violation, WorkPattern,
};
pub use domain::repositories::{HolidayProvider, ScheduleStore};
pub use domain::rules::{SchedulingRules, ScorePenalties};
pub use domain::services::{MonthlyPlanner, ScheduleEvaluator, ScheduleGenerator};
pub use shared::{DomainError, DomainResult, ScoreCategory, Severity, ShiftCategory, ShiftKind};

/// Generate a schedule for `period`: one shift kind per (employee, day),
/// scored and annotated with every rule violation the evaluator finds.
pub fn generate_schedule(
    service: &Service,
    period: SchedulePeriod,
    employees: &[Employee],
    holidays: &HashSet<NaiveDate>,
    previous_month_shifts: Option<&[AssignedShift]>,
    config: &SchedulingRules,
) -> ScheduleOutcome {
    ScheduleGenerator::new(service, employees, holidays, config)
        .generate(period, previous_month_shifts)
}

/// Evaluate an arbitrary shift set against the same rules the generator
/// uses. The input shifts are echoed back in the outcome.
pub fn evaluate_schedule(
    shifts: &[AssignedShift],
    service: &Service,
    period: SchedulePeriod,
    employees: &[Employee],
    holidays: &HashSet<NaiveDate>,
    previous_month_shifts: Option<&[AssignedShift]>,
    config: &SchedulingRules,
) -> ScheduleOutcome {
    ScheduleEvaluator::new(service, employees, holidays, config).evaluate(
        shifts,
        period,
        previous_month_shifts,
    )
}
