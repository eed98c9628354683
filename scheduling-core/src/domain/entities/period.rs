use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{time, DomainError, DomainResult};

/// A validated (year, month) pair naming the month to schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulePeriod {
    year: i32,
    month: u32,
}

impl SchedulePeriod {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidDate(format!(
                "month must be 1..=12, got {month}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidDate(format!(
                "no such month: {year}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parse the wire forms: month "1".."12", year "YYYY".
    pub fn from_strings(month: &str, year: &str) -> DomainResult<Self> {
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainError::InvalidDate(format!("invalid month: {month:?}")))?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| DomainError::InvalidDate(format!("invalid year: {year:?}")))?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// All days of the month, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        time::month_days(self.year, self.month)
    }

    /// The month before this one, rolling the year across January.
    pub fn previous(&self) -> SchedulePeriod {
        if self.month == 1 {
            SchedulePeriod {
                year: self.year - 1,
                month: 12,
            }
        } else {
            SchedulePeriod {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `YYYY-MM`, the date form of month-scope violations.
    pub fn month_scope(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// "Febrero 2025" for response texts.
    pub fn display_es(&self) -> String {
        format!("{} {}", time::month_name_es(self.month), self.year)
    }
}
