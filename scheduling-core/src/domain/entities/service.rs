use serde::{Deserialize, Serialize};
use shared::ShiftKind;
use uuid::Uuid;

/// Staff required for one work kind, split by day class.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDemand {
    pub weekday: u32,
    pub weekend_or_holiday: u32,
}

impl ShiftDemand {
    pub fn on(&self, weekend_or_holiday: bool) -> u32 {
        if weekend_or_holiday {
            self.weekend_or_holiday
        } else {
            self.weekday
        }
    }
}

/// Demand table for the three work kinds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaffingNeeds {
    pub morning: ShiftDemand,
    pub afternoon: ShiftDemand,
    pub night: ShiftDemand,
}

impl StaffingNeeds {
    pub fn for_kind(&self, kind: ShiftKind) -> Option<ShiftDemand> {
        match kind {
            ShiftKind::M => Some(self.morning),
            ShiftKind::T => Some(self.afternoon),
            ShiftKind::N => Some(self.night),
            _ => None,
        }
    }
}

/// Per-service limits on work and rest streaks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsecutivenessRules {
    pub max_consecutive_work_days: u32,
    pub preferred_consecutive_work_days: u32,
    pub max_consecutive_days_off: u32,
    pub preferred_consecutive_days_off: u32,
    pub min_consecutive_days_off_required_before_work: u32,
}

impl Default for ConsecutivenessRules {
    fn default() -> Self {
        Self {
            max_consecutive_work_days: 7,
            preferred_consecutive_work_days: 5,
            max_consecutive_days_off: 4,
            preferred_consecutive_days_off: 2,
            min_consecutive_days_off_required_before_work: 1,
        }
    }
}

/// A demand-owning organizational unit (e.g. a ward).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub enable_night_shift: bool,
    #[serde(default)]
    pub staffing_needs: StaffingNeeds,
    #[serde(default)]
    pub consecutiveness_rules: ConsecutivenessRules,
    /// Complete Saturday-Sunday pairs off each employee should reach per
    /// month; falls back to the rule configuration default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_complete_weekends_off: Option<u32>,
}

impl Service {
    /// Staff needed for `kind` on the given day class. Zero for night duty
    /// while night shifts are disabled, and for off kinds.
    pub fn demand_for(&self, kind: ShiftKind, weekend_or_holiday: bool) -> u32 {
        if kind == ShiftKind::N && !self.enable_night_shift {
            return 0;
        }
        self.staffing_needs
            .for_kind(kind)
            .map_or(0, |demand| demand.on(weekend_or_holiday))
    }

    pub fn effective_weekend_target(&self, default_target: u32) -> u32 {
        self.target_complete_weekends_off.unwrap_or(default_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_needs() -> Service {
        Service {
            id: Uuid::new_v4(),
            name: "Guardia".to_string(),
            enable_night_shift: false,
            staffing_needs: StaffingNeeds {
                morning: ShiftDemand {
                    weekday: 2,
                    weekend_or_holiday: 1,
                },
                afternoon: ShiftDemand {
                    weekday: 1,
                    weekend_or_holiday: 1,
                },
                night: ShiftDemand {
                    weekday: 1,
                    weekend_or_holiday: 1,
                },
            },
            consecutiveness_rules: ConsecutivenessRules::default(),
            target_complete_weekends_off: None,
        }
    }

    #[test]
    fn test_demand_uses_day_class() {
        let service = service_with_needs();
        assert_eq!(service.demand_for(ShiftKind::M, false), 2);
        assert_eq!(service.demand_for(ShiftKind::M, true), 1);
        assert_eq!(service.demand_for(ShiftKind::D, false), 0);
    }

    #[test]
    fn test_night_demand_zero_when_disabled() {
        let mut service = service_with_needs();
        assert_eq!(service.demand_for(ShiftKind::N, false), 0);
        service.enable_night_shift = true;
        assert_eq!(service.demand_for(ShiftKind::N, false), 1);
    }

    #[test]
    fn test_weekend_target_falls_back_to_default() {
        let mut service = service_with_needs();
        assert_eq!(service.effective_weekend_target(1), 1);
        service.target_complete_weekends_off = Some(2);
        assert_eq!(service.effective_weekend_target(1), 2);
    }
}
