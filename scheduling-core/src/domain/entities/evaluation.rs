use serde::{Deserialize, Serialize};
use shared::{ScoreCategory, Severity};

use super::AssignedShift;

/// One rule breach found while generating or replaying a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// `YYYY-MM-DD`, or `YYYY-MM` for month-scope findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// A shift code, or "General" when no single shift is at fault.
    pub shift_type: String,
    pub rule: String,
    pub details: String,
    pub severity: Severity,
    pub category: ScoreCategory,
}

/// Score per category, each clamped to 0..=100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub service_rules: u32,
    pub employee_wellbeing: u32,
}

/// What both entry points return: the shifts, their quality score, the
/// violations behind it, and a human-readable Spanish summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutcome {
    pub generated_shifts: Vec<AssignedShift>,
    pub response_text: String,
    pub violations: Vec<Violation>,
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
}
