use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::types::ShiftKind;

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map_or(0, |d| d.day())
}

/// All days of the given month, in order.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

/// Saturday and Sunday count as weekend.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Normalized key for a weekday (lowercase Spanish name, no diacritics).
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miercoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sabado",
        Weekday::Sun => "domingo",
    }
}

/// Lowercase a weekday name and strip the diacritics that appear in the
/// Spanish names, so "Miércoles" and "miercoles" map to the same key.
pub fn normalize_weekday_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// Spanish month name for response texts (1 = Enero).
pub fn month_name_es(month: u32) -> &'static str {
    match month {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "",
    }
}

/// Absolute instant at which a work shift on `date` begins.
pub fn shift_start_instant(date: NaiveDate, kind: ShiftKind) -> Option<NaiveDateTime> {
    kind.start_time().map(|t| date.and_time(t))
}

/// Absolute instant at which a work shift on `date` ends. An end hour before
/// noon belongs to the next calendar day (night shifts cross midnight).
pub fn shift_end_instant(date: NaiveDate, kind: ShiftKind) -> Option<NaiveDateTime> {
    let end = kind.end_time()?;
    if end.hour() < 12 {
        date.succ_opt().map(|next| next.and_time(end))
    } else {
        Some(date.and_time(end))
    }
}

/// Hours of rest between the end of one shift and the start of the next.
/// Negative when the next shift starts before the prior one ended.
pub fn rest_hours_between(prior_end: NaiveDateTime, next_start: NaiveDateTime) -> f64 {
    (next_start - prior_end).num_minutes() as f64 / 60.0
}

/// Serde helpers for optional `HH:MM` time fields. Off shifts carry no
/// window and serialize as the empty string, the form external editors emit.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(text) => NaiveTime::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_february_expansion() {
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        let days = month_days(2025, 2);
        assert_eq!(days.len(), 28);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(days[27], NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_weekend_classification() {
        // 2025-02-01 is a Saturday, 2025-02-03 a Monday
        assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 2, 2).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()));
    }

    #[test]
    fn test_weekday_normalization() {
        assert_eq!(normalize_weekday_name("Miércoles"), "miercoles");
        assert_eq!(normalize_weekday_name("SÁBADO"), "sabado");
        assert_eq!(normalize_weekday_name(" lunes "), "lunes");
        assert_eq!(weekday_key(Weekday::Wed), "miercoles");
    }

    #[test]
    fn test_night_shift_ends_next_day() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let end = shift_end_instant(date, ShiftKind::N).unwrap();
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 2, 11).unwrap());
        assert_eq!(end.time(), chrono::NaiveTime::from_hms_opt(7, 0, 0).unwrap());

        let morning_end = shift_end_instant(date, ShiftKind::M).unwrap();
        assert_eq!(morning_end.date(), date);
    }

    #[test]
    fn test_rest_hours_across_midnight() {
        let night = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let next = NaiveDate::from_ymd_opt(2025, 2, 11).unwrap();
        let end = shift_end_instant(night, ShiftKind::N).unwrap();
        let morning = shift_start_instant(next, ShiftKind::M).unwrap();
        // night ends 07:00 on the 11th, morning starts 07:00 the same day
        assert_eq!(rest_hours_between(end, morning), 0.0);

        let afternoon = shift_start_instant(next, ShiftKind::T).unwrap();
        assert_eq!(rest_hours_between(end, afternoon), 8.0);
    }

    #[test]
    fn test_hhmm_round_trip() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Window {
            #[serde(with = "hhmm")]
            start: Option<NaiveTime>,
        }

        let json = serde_json::to_string(&Window {
            start: chrono::NaiveTime::from_hms_opt(7, 0, 0),
        })
        .unwrap();
        assert_eq!(json, "{\"start\":\"07:00\"}");

        let empty: Window = serde_json::from_str("{\"start\":\"\"}").unwrap();
        assert!(empty.start.is_none());
    }
}
