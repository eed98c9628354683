use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use shared::{time, ScoreCategory, Severity, ShiftKind};
use uuid::Uuid;

use crate::domain::entities::{
    AssignedShift, Employee, FixedShiftTiming, SchedulePeriod, ScheduleOutcome, ScoreBreakdown,
    Service, Violation,
};
use crate::domain::notes;
use crate::domain::rules::{self, SchedulingRules, ShiftContext};
use crate::domain::services::history;

/// Replays any shift set, generated or hand-edited, against the rules and
/// produces the score, the per-category breakdown, the violation list and
/// the Spanish summary. Deterministic: the same inputs always evaluate to
/// the same outcome.
pub struct ScheduleEvaluator<'a> {
    service: &'a Service,
    roster: Vec<&'a Employee>,
    holidays: &'a HashSet<NaiveDate>,
    config: &'a SchedulingRules,
}

impl<'a> ScheduleEvaluator<'a> {
    pub fn new(
        service: &'a Service,
        employees: &'a [Employee],
        holidays: &'a HashSet<NaiveDate>,
        config: &'a SchedulingRules,
    ) -> Self {
        let roster = employees
            .iter()
            .filter(|employee| employee.is_assigned_to(service.id))
            .collect();
        Self {
            service,
            roster,
            holidays,
            config,
        }
    }

    pub fn evaluate(
        &self,
        shifts: &[AssignedShift],
        period: SchedulePeriod,
        previous_shifts: Option<&[AssignedShift]>,
    ) -> ScheduleOutcome {
        let mut states = history::seed_employee_states(
            &self.roster,
            previous_shifts,
            &self.service.consecutiveness_rules,
            period.first_day(),
        );
        let shift_rules = rules::standard_rules(&self.service.consecutiveness_rules, self.config);

        let mut violations: Vec<Violation> = Vec::new();
        let mut total_penalty: u32 = 0;
        let mut service_penalty: u32 = 0;
        let mut wellbeing_penalty: u32 = 0;

        // A fixed night preference is unservable while night shifts are off;
        // surfaced here so manual evaluations see it too. No points: the
        // uncovered days already charge their own shortages.
        for &employee in &self.roster {
            if employee.follows_weekly_preferences()
                && employee.preferences.fixed_weekly_shift_timing == FixedShiftTiming::Night
                && !employee.preferences.fixed_weekly_shift_days.is_empty()
                && !self.service.enable_night_shift
            {
                violations.push(Violation {
                    employee_name: Some(employee.name.clone()),
                    date: Some(period.month_scope()),
                    shift_type: ShiftKind::N.code().to_string(),
                    rule: "Preferencia Fija Nocturna No Disponible".to_string(),
                    details: format!(
                        "{} tiene preferencia fija de turno noche pero el servicio no tiene la nocturnidad habilitada.",
                        employee.name
                    ),
                    severity: Severity::Error,
                    category: ScoreCategory::ServiceRule,
                });
            }
        }

        let mut by_day: HashMap<(&str, NaiveDate), &AssignedShift> = HashMap::new();
        for shift in shifts {
            by_day.insert((shift.employee_name.as_str(), shift.date), shift);
        }

        let mut derived: HashMap<(Uuid, NaiveDate), ShiftKind> = HashMap::new();

        for date in period.days() {
            let holiday = self.holidays.contains(&date);
            let weekend_or_holiday = time::is_weekend(date) || holiday;
            let mut worked: HashMap<ShiftKind, u32> = HashMap::new();

            for &employee in &self.roster {
                // an absent record counts as rest; it does not by itself
                // create a shortage beyond the per-kind tally below
                let kind = by_day
                    .get(&(employee.name.as_str(), date))
                    .map(|shift| notes::classify(&shift.notes, shift.start_time))
                    .unwrap_or(ShiftKind::D);
                let start = time::shift_start_instant(date, kind);

                let Some(state) = states.get_mut(&employee.id) else {
                    continue;
                };

                {
                    let context = ShiftContext {
                        employee_name: &employee.name,
                        date,
                        kind,
                        start,
                        state: &*state,
                    };
                    for rule in &shift_rules {
                        if let Some(violation) = rule.check(&context) {
                            let penalty = rule.penalty();
                            match violation.category {
                                ScoreCategory::ServiceRule => service_penalty += penalty,
                                ScoreCategory::EmployeeWellbeing => wellbeing_penalty += penalty,
                            }
                            total_penalty += penalty;
                            violations.push(violation);
                        }
                    }
                }

                state.apply(kind, date);
                derived.insert((employee.id, date), kind);
                if kind.is_work() {
                    *worked.entry(kind).or_insert(0) += 1;
                }

                // a complete weekend off closes on a Sunday whose Saturday
                // belongs to the same month
                if date.weekday() == Weekday::Sun && date.day() > 1 && kind.is_off() {
                    if let Some(saturday) = date.pred_opt() {
                        let saturday_off = derived
                            .get(&(employee.id, saturday))
                            .map_or(true, |k| k.is_off());
                        if saturday_off {
                            state.complete_weekends_off_this_month += 1;
                        }
                    }
                }
            }

            for kind in ShiftKind::WORK_KINDS {
                if kind == ShiftKind::N && !self.service.enable_night_shift {
                    continue;
                }
                let needed = self.service.demand_for(kind, weekend_or_holiday);
                let assigned = worked.get(&kind).copied().unwrap_or(0);
                if assigned >= needed {
                    continue;
                }
                let missing = needed - assigned;
                let penalty = missing * self.config.penalties.staffing_shortage_per_missing;
                service_penalty += penalty;
                total_penalty += penalty;
                violations.push(Violation {
                    employee_name: None,
                    date: Some(date.to_string()),
                    shift_type: kind.code().to_string(),
                    rule: "Falta de Personal".to_string(),
                    details: format!(
                        "Faltan {} persona(s) para el turno {} el {} (cubiertos {} de {}).",
                        missing,
                        kind.code(),
                        date,
                        assigned,
                        needed
                    ),
                    severity: Severity::Error,
                    category: ScoreCategory::ServiceRule,
                });
            }
        }

        let target = self
            .service
            .effective_weekend_target(self.config.default_target_complete_weekends_off);
        if target > 0 {
            for &employee in &self.roster {
                let achieved = states
                    .get(&employee.id)
                    .map_or(0, |state| state.complete_weekends_off_this_month);
                if achieved >= target {
                    continue;
                }
                let penalty = ((target - achieved)
                    * self.config.penalties.weekend_target_not_met_per_weekend)
                    .min(self.config.penalties.max_weekend_target_penalty);
                wellbeing_penalty += penalty;
                total_penalty += penalty;
                violations.push(Violation {
                    employee_name: Some(employee.name.clone()),
                    date: Some(period.month_scope()),
                    shift_type: "General".to_string(),
                    rule: "Objetivo FDS Descanso No Alcanzado".to_string(),
                    details: format!(
                        "Logró {} de {} fin(es) de semana completo(s) de descanso.",
                        achieved, target
                    ),
                    severity: Severity::Warning,
                    category: ScoreCategory::EmployeeWellbeing,
                });
            }
        }

        let score = 100u32.saturating_sub(total_penalty);
        let score_breakdown = ScoreBreakdown {
            service_rules: 100u32.saturating_sub(service_penalty),
            employee_wellbeing: 100u32.saturating_sub(wellbeing_penalty),
        };

        let errors = violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        let warnings = violations.len() - errors;
        let response_text = build_response_text(
            &self.service.name,
            period,
            score,
            score_breakdown,
            errors,
            warnings,
        );

        tracing::debug!(
            service = %self.service.name,
            score,
            errors,
            warnings,
            "evaluación completada"
        );

        ScheduleOutcome {
            generated_shifts: shifts.to_vec(),
            response_text,
            violations,
            score,
            score_breakdown,
        }
    }
}

fn build_response_text(
    service_name: &str,
    period: SchedulePeriod,
    score: u32,
    breakdown: ScoreBreakdown,
    errors: usize,
    warnings: usize,
) -> String {
    let mut text = format!(
        "Evaluación del horario para {} ({}). Puntuación General: {}/100. [Reglas Servicio: {}/100, Bienestar Personal: {}/100].",
        service_name,
        period.display_es(),
        score,
        breakdown.service_rules,
        breakdown.employee_wellbeing
    );
    if errors > 0 {
        text.push_str(&format!(" Errores Críticos: {errors}."));
    }
    if warnings > 0 {
        text.push_str(&format!(" Advertencias: {warnings}."));
    }
    if errors == 0 && warnings == 0 {
        text.push_str(" ¡Sin errores ni advertencias notables!");
    }
    text
}
