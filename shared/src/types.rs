use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Whether a shift kind puts the employee on duty or off duty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShiftCategory {
    Work,
    Off,
}

/// The closed set of codes a schedule cell can hold.
///
/// Work kinds carry a canonical time window; off kinds carry none.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ShiftKind {
    /// Morning duty, 07:00-15:00.
    M,
    /// Afternoon duty, 15:00-23:00.
    T,
    /// Night duty, 23:00-07:00 the next calendar day.
    N,
    /// Rest day.
    D,
    /// Holiday off.
    F,
    /// Compensatory day off.
    C,
    /// Annual leave.
    #[serde(rename = "LAO")]
    Lao,
    /// Medical leave.
    #[serde(rename = "LM")]
    Lm,
}

impl ShiftKind {
    /// The three work kinds in demand-coverage order.
    pub const WORK_KINDS: [ShiftKind; 3] = [ShiftKind::M, ShiftKind::T, ShiftKind::N];

    pub fn category(&self) -> ShiftCategory {
        match self {
            ShiftKind::M | ShiftKind::T | ShiftKind::N => ShiftCategory::Work,
            _ => ShiftCategory::Off,
        }
    }

    pub fn is_work(&self) -> bool {
        self.category() == ShiftCategory::Work
    }

    pub fn is_off(&self) -> bool {
        self.category() == ShiftCategory::Off
    }

    /// Wire spelling of the code ("M", "T", ..., "LAO", "LM").
    pub fn code(&self) -> &'static str {
        match self {
            ShiftKind::M => "M",
            ShiftKind::T => "T",
            ShiftKind::N => "N",
            ShiftKind::D => "D",
            ShiftKind::F => "F",
            ShiftKind::C => "C",
            ShiftKind::Lao => "LAO",
            ShiftKind::Lm => "LM",
        }
    }

    /// Display name used in notes and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::M => "Mañana",
            ShiftKind::T => "Tarde",
            ShiftKind::N => "Noche",
            ShiftKind::D => "Descanso",
            ShiftKind::F => "Feriado",
            ShiftKind::C => "Franco Compensatorio",
            ShiftKind::Lao => "Licencia Anual Ordinaria",
            ShiftKind::Lm => "Licencia Médica",
        }
    }

    /// Canonical start of the window for work kinds.
    pub fn start_time(&self) -> Option<NaiveTime> {
        match self {
            ShiftKind::M => hm(7, 0),
            ShiftKind::T => hm(15, 0),
            ShiftKind::N => hm(23, 0),
            _ => None,
        }
    }

    /// Canonical end of the window for work kinds. A night shift ends on the
    /// next calendar day; the rollover is handled by the time helpers.
    pub fn end_time(&self) -> Option<NaiveTime> {
        match self {
            ShiftKind::M => hm(15, 0),
            ShiftKind::T => hm(23, 0),
            ShiftKind::N => hm(7, 0),
            _ => None,
        }
    }
}

fn hm(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// How serious a rule breach is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which score bucket a rule breach is charged against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    ServiceRule,
    EmployeeWellbeing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_and_off_categories() {
        assert!(ShiftKind::M.is_work());
        assert!(ShiftKind::T.is_work());
        assert!(ShiftKind::N.is_work());
        assert!(ShiftKind::D.is_off());
        assert!(ShiftKind::F.is_off());
        assert!(ShiftKind::C.is_off());
        assert!(ShiftKind::Lao.is_off());
        assert!(ShiftKind::Lm.is_off());
    }

    #[test]
    fn test_canonical_windows() {
        assert_eq!(
            ShiftKind::M.start_time(),
            NaiveTime::from_hms_opt(7, 0, 0)
        );
        assert_eq!(ShiftKind::N.end_time(), NaiveTime::from_hms_opt(7, 0, 0));
        assert_eq!(ShiftKind::D.start_time(), None);
        assert_eq!(ShiftKind::Lao.end_time(), None);
    }

    #[test]
    fn test_leave_kinds_serialize_as_codes() {
        assert_eq!(serde_json::to_string(&ShiftKind::Lao).unwrap(), "\"LAO\"");
        assert_eq!(serde_json::to_string(&ShiftKind::Lm).unwrap(), "\"LM\"");
        assert_eq!(serde_json::to_string(&ShiftKind::M).unwrap(), "\"M\"");
        assert_eq!(
            serde_json::from_str::<ShiftKind>("\"LAO\"").unwrap(),
            ShiftKind::Lao
        );
    }
}
