//! The note vocabulary written into `AssignedShift::notes`, and the inverse
//! classifier that recovers a shift kind from it.
//!
//! The exact substrings are a wire contract with external editors: schedules
//! round-trip through the `notes` field, so every builder here must classify
//! back to the kind it was built for. Builders and classifier live side by
//! side to keep the two directions in lockstep.

use chrono::{NaiveTime, Timelike};
use shared::ShiftKind;

/// Plain demand-coverage work shift: "Turno Mañana (M)".
pub fn work_shift(kind: ShiftKind) -> String {
    format!("Turno {} ({})", kind.label(), kind.code())
}

/// Work shift placed by a Monday-to-Friday pattern: "Turno Patrón (M)".
pub fn pattern_work(kind: ShiftKind) -> String {
    format!("Turno Patrón ({})", kind.code())
}

/// Weekend rest for a Monday-to-Friday pattern.
pub fn pattern_rest() -> &'static str {
    "D (Descanso - Patrón Fijo)"
}

/// Weekday holiday for a Monday-to-Friday pattern.
pub fn pattern_holiday() -> &'static str {
    "F (Feriado - Patrón Fijo)"
}

/// Fixed absence (D, LAO or LM), optionally with the declared description.
pub fn fixed_absence(kind: ShiftKind, description: Option<&str>) -> String {
    match description {
        Some(text) if !text.trim().is_empty() => format!("{} - {}", kind.code(), text.trim()),
        _ => kind.code().to_string(),
    }
}

/// Fixed weekly rest day.
pub fn fixed_weekly_rest() -> &'static str {
    "D (Fijo Semanal)"
}

/// Fixed weekly rest day falling on a holiday.
pub fn fixed_weekly_rest_holiday() -> &'static str {
    "F (Feriado - Descanso Fijo)"
}

/// Fixed weekly work shift: "Turno Fijo (M)".
pub fn fixed_weekly_work(kind: ShiftKind) -> String {
    format!("Turno Fijo ({})", kind.code())
}

/// Holiday absorbing a fixed weekly work shift: "F (Feriado - Cubría M)".
pub fn fixed_weekly_covered_by_holiday(kind: ShiftKind) -> String {
    format!("F (Feriado - Cubría {})", kind.code())
}

/// Residual rest for everyone left unassigned at the end of the day.
pub fn residual_rest(holiday: bool) -> &'static str {
    if holiday {
        "F"
    } else {
        "D"
    }
}

/// Residual rest tagged as part of a complete weekend off.
pub fn weekend_objective_rest(holiday: bool) -> &'static str {
    if holiday {
        "F (FDS Objetivo - Feriado)"
    } else {
        "D (FDS Objetivo)"
    }
}

/// Recover the shift kind from a notes string, falling back to the start
/// time and finally to a rest day. Match order follows the contract: leave
/// codes, compensatory, holiday, rest, then the clock, then work-kind words.
pub fn classify(notes: &str, start_time: Option<NaiveTime>) -> ShiftKind {
    let text = notes.trim().to_uppercase();

    if text.starts_with("LAO") {
        return ShiftKind::Lao;
    }
    if text.starts_with("LM") {
        return ShiftKind::Lm;
    }
    if text.contains("FRANCO COMP") || text == "C" {
        return ShiftKind::C;
    }
    if text.contains("FERIADO") || text.starts_with('F') {
        return ShiftKind::F;
    }
    if text.contains("DESCANSO") || text == "D" || text.starts_with("D ") || text.starts_with("D (")
    {
        return ShiftKind::D;
    }

    if let Some(start) = start_time {
        match start.hour() {
            7 | 8 => return ShiftKind::M,
            14 | 15 => return ShiftKind::T,
            22 | 23 => return ShiftKind::N,
            _ => {}
        }
    }

    if text.contains("MAÑANA") || text.contains("(M)") {
        return ShiftKind::M;
    }
    if text.contains("TARDE") || text.contains("(T)") {
        return ShiftKind::T;
    }
    if text.contains("NOCHE") || text.contains("(N)") {
        return ShiftKind::N;
    }

    ShiftKind::D
}
