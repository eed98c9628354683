use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{ScoreCategory, Severity};

use crate::domain::entities::{
    AssignedShift, Employee, SchedulePeriod, ScheduleOutcome, ScoreBreakdown, Service, Violation,
};
use crate::domain::rules::SchedulingRules;
use crate::domain::services::engine::AssignmentEngine;
use crate::domain::services::evaluator::ScheduleEvaluator;
use crate::domain::services::history;

const MAX_ATTEMPTS: u32 = 15;
const TARGET_SCORE: u32 = 80;

/// Runs the assignment engine up to a fixed number of attempts, evaluates
/// each attempt, and keeps the best-scoring one. The only non-determinism
/// between attempts is the engine's random tie-break, so a seeded
/// configuration makes the whole loop reproducible.
pub struct ScheduleGenerator<'a> {
    service: &'a Service,
    employees: &'a [Employee],
    holidays: &'a HashSet<NaiveDate>,
    config: &'a SchedulingRules,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(
        service: &'a Service,
        employees: &'a [Employee],
        holidays: &'a HashSet<NaiveDate>,
        config: &'a SchedulingRules,
    ) -> Self {
        Self {
            service,
            employees,
            holidays,
            config,
            cancel_flag: None,
        }
    }

    /// Cooperative cancellation, checked between attempts; the best result
    /// so far is returned when the flag is raised.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    #[tracing::instrument(skip_all, fields(service = %self.service.name))]
    pub fn generate(
        &self,
        period: SchedulePeriod,
        previous_shifts: Option<&[AssignedShift]>,
    ) -> ScheduleOutcome {
        let roster: Vec<&Employee> = self
            .employees
            .iter()
            .filter(|employee| employee.is_assigned_to(self.service.id))
            .collect();
        if roster.is_empty() {
            tracing::warn!("el servicio no tiene empleados asignados");
            return self.no_employees_outcome(period);
        }

        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let engine = AssignmentEngine::new(self.service, self.employees, self.holidays, self.config);
        let evaluator =
            ScheduleEvaluator::new(self.service, self.employees, self.holidays, self.config);

        let mut best: Option<ScheduleOutcome> = None;
        let mut attempts_made = 0;

        for attempt in 1..=MAX_ATTEMPTS {
            let mut states = history::seed_employee_states(
                &roster,
                previous_shifts,
                &self.service.consecutiveness_rules,
                period.first_day(),
            );
            let shifts = engine.run(period, &mut states, &mut rng);
            let outcome = evaluator.evaluate(&shifts, period, previous_shifts);
            attempts_made = attempt;

            tracing::debug!(attempt, score = outcome.score, "intento evaluado");

            let improves = best
                .as_ref()
                .map_or(true, |current| outcome.score > current.score);
            if improves {
                best = Some(outcome);
            }

            let best_score = best.as_ref().map_or(0, |current| current.score);
            if best_score >= TARGET_SCORE {
                break;
            }
            if self
                .cancel_flag
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                tracing::info!(attempt, "generación cancelada; se devuelve el mejor intento");
                break;
            }
        }

        // the loop always runs at least once for a non-empty roster
        let mut result = match best {
            Some(outcome) => outcome,
            None => self.no_employees_outcome(period),
        };

        if result.score < TARGET_SCORE && attempts_made == MAX_ATTEMPTS {
            result.response_text.push_str(&format!(
                " (Se alcanzó el máximo de {MAX_ATTEMPTS} intentos sin superar el objetivo de {TARGET_SCORE} puntos.)"
            ));
        }

        tracing::info!(
            attempts = attempts_made,
            score = result.score,
            "generación finalizada"
        );
        result
    }

    fn no_employees_outcome(&self, period: SchedulePeriod) -> ScheduleOutcome {
        ScheduleOutcome {
            generated_shifts: Vec::new(),
            response_text: format!(
                "No se pudo generar el horario para {} ({}): el servicio no tiene empleados asignados.",
                self.service.name,
                period.display_es()
            ),
            violations: vec![Violation {
                employee_name: None,
                date: Some(period.month_scope()),
                shift_type: "General".to_string(),
                rule: "Sin Empleados".to_string(),
                details: format!(
                    "El servicio {} no tiene empleados asignados.",
                    self.service.name
                ),
                severity: Severity::Error,
                category: ScoreCategory::ServiceRule,
            }],
            score: 0,
            score_breakdown: ScoreBreakdown {
                service_rules: 0,
                employee_wellbeing: 100,
            },
        }
    }
}
