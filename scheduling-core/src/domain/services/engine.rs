use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::Rng;
use shared::{time, ShiftKind};
use uuid::Uuid;

use crate::domain::entities::{AssignedShift, Employee, FixedShiftTiming, SchedulePeriod, Service};
use crate::domain::notes;
use crate::domain::rules::SchedulingRules;
use crate::domain::state::{DayBoard, EmployeeState};

/// Lexicographic sort key for demand-coverage candidates; smaller wins.
/// Order: well-rested spells first, short work blocks kept intact, weekend
/// seekers on busy days, fewer shifts this month, general weekend bias,
/// resting before working (longest rest first, shortest block first), and a
/// random tie-break.
type CandidateKey = (u8, u8, u8, u32, u8, u8, u32, u32);

/// The shifts produced so far in one attempt, with a kind index for the
/// weekend-pair lookups.
#[derive(Debug, Default)]
struct AttemptSheet {
    shifts: Vec<AssignedShift>,
    kinds: HashMap<(Uuid, NaiveDate), ShiftKind>,
}

impl AttemptSheet {
    fn kind_on(&self, employee_id: Uuid, date: NaiveDate) -> Option<ShiftKind> {
        self.kinds.get(&(employee_id, date)).copied()
    }
}

/// Day-by-day layered assignment: work patterns, fixed absences, fixed
/// weekly preferences, demand coverage, residual rest. Places exactly one
/// shift kind per (employee, day); a layer never touches an employee an
/// earlier layer already processed.
pub struct AssignmentEngine<'a> {
    service: &'a Service,
    roster: Vec<&'a Employee>,
    holidays: &'a HashSet<NaiveDate>,
    config: &'a SchedulingRules,
}

impl<'a> AssignmentEngine<'a> {
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

    /// Produce one full monthly assignment, mutating `states` as it goes.
    pub fn run(
        &self,
        period: SchedulePeriod,
        states: &mut HashMap<Uuid, EmployeeState>,
        rng: &mut StdRng,
    ) -> Vec<AssignedShift> {
        let mut sheet = AttemptSheet::default();

        for date in period.days() {
            let holiday = self.holidays.contains(&date);
            let weekend = time::is_weekend(date);
            let weekend_or_holiday = weekend || holiday;
            let mut board = DayBoard::for_day(self.service, weekend_or_holiday);

            self.apply_work_patterns(date, weekend, holiday, &mut board, states, &mut sheet);
            self.apply_fixed_absences(date, &mut board, states, &mut sheet);
            self.apply_fixed_weekly_preferences(date, weekend, holiday, &mut board, states, &mut sheet);
            self.cover_demand(date, weekend_or_holiday, &mut board, states, &mut sheet, rng);
            self.assign_residual_rest(date, weekend, holiday, &mut board, states, &mut sheet);

            let uncovered = board.remaining_need.get(ShiftKind::M)
                + board.remaining_need.get(ShiftKind::T)
                + board.remaining_need.get(ShiftKind::N);
            if uncovered > 0 {
                tracing::debug!(date = %date, uncovered, "demanda residual sin cubrir");
            }
        }

        sheet.shifts
    }

    fn place(
        &self,
        employee: &Employee,
        date: NaiveDate,
        kind: ShiftKind,
        note: String,
        board: &mut DayBoard,
        states: &mut HashMap<Uuid, EmployeeState>,
        sheet: &mut AttemptSheet,
    ) {
        sheet.shifts.push(AssignedShift::for_kind(
            date,
            &employee.name,
            &self.service.name,
            kind,
            note,
        ));
        sheet.kinds.insert((employee.id, date), kind);
        if let Some(state) = states.get_mut(&employee.id) {
            state.apply(kind, date);
        }
        board.mark(employee.id, kind);
    }

    /// Layer A: Monday-to-Friday patterns. Weekends rest, weekday holidays
    /// get F, normal weekdays get the pattern's shift when the rest window
    /// allows it; otherwise the day is left for the later layers.
    fn apply_work_patterns(
        &self,
        date: NaiveDate,
        weekend: bool,
        holiday: bool,
        board: &mut DayBoard,
        states: &mut HashMap<Uuid, EmployeeState>,
        sheet: &mut AttemptSheet,
    ) {
        let min_rest = self.config.min_rest_hours_between_shifts;

        for &employee in &self.roster {
            let Some(kind) = employee
                .preferences
                .work_pattern
                .and_then(|pattern| pattern.weekday_shift())
            else {
                continue;
            };
            if board.is_processed(employee.id) {
                continue;
            }

            if weekend {
                self.place(
                    employee,
                    date,
                    ShiftKind::D,
                    notes::pattern_rest().to_string(),
                    board,
                    states,
                    sheet,
                );
            } else if holiday {
                self.place(
                    employee,
                    date,
                    ShiftKind::F,
                    notes::pattern_holiday().to_string(),
                    board,
                    states,
                    sheet,
                );
            } else {
                let rest_ok = states
                    .get(&employee.id)
                    .map_or(true, |state| state.satisfies_rest_window(date, kind, min_rest));
                if rest_ok {
                    board.remaining_need.take_one(kind);
                    self.place(
                        employee,
                        date,
                        kind,
                        notes::pattern_work(kind),
                        board,
                        states,
                        sheet,
                    );
                } else {
                    tracing::warn!(
                        employee = %employee.name,
                        date = %date,
                        shift = kind.code(),
                        "patrón fijo sin descanso mínimo; el día pasa a las capas siguientes"
                    );
                }
            }
        }
    }

    /// Layer B: declared absences (D, LAO, LM) covering today.
    fn apply_fixed_absences(
        &self,
        date: NaiveDate,
        board: &mut DayBoard,
        states: &mut HashMap<Uuid, EmployeeState>,
        sheet: &mut AttemptSheet,
    ) {
        for &employee in &self.roster {
            if board.is_processed(employee.id) {
                continue;
            }
            let Some(absence) = employee.fixed_absence_on(date) else {
                continue;
            };
            if absence.kind.is_work() {
                tracing::warn!(
                    employee = %employee.name,
                    date = %date,
                    "asignación fija con tipo de trabajo; se ignora"
                );
                continue;
            }
            let note = notes::fixed_absence(absence.kind, absence.description.as_deref());
            self.place(employee, date, absence.kind, note, board, states, sheet);
        }
    }

    /// Layer C: fixed weekly preferences, only for employees following a
    /// standard rotation.
    fn apply_fixed_weekly_preferences(
        &self,
        date: NaiveDate,
        weekend: bool,
        holiday: bool,
        board: &mut DayBoard,
        states: &mut HashMap<Uuid, EmployeeState>,
        sheet: &mut AttemptSheet,
    ) {
        let weekday_key = time::weekday_key(date.weekday());
        let min_rest = self.config.min_rest_hours_between_shifts;
        let limits = &self.service.consecutiveness_rules;

        for &employee in &self.roster {
            if board.is_processed(employee.id) {
                continue;
            }
            if !employee.follows_weekly_preferences() {
                continue;
            }
            if !employee.has_fixed_day(weekday_key) {
                continue;
            }

            match employee.preferences.fixed_weekly_shift_timing {
                FixedShiftTiming::None => {}
                FixedShiftTiming::RestDay => {
                    if holiday {
                        self.place(
                            employee,
                            date,
                            ShiftKind::F,
                            notes::fixed_weekly_rest_holiday().to_string(),
                            board,
                            states,
                            sheet,
                        );
                    } else {
                        self.place(
                            employee,
                            date,
                            ShiftKind::D,
                            notes::fixed_weekly_rest().to_string(),
                            board,
                            states,
                            sheet,
                        );
                    }
                }
                timing => {
                    let Some(kind) = timing.shift_kind() else {
                        continue;
                    };
                    if kind == ShiftKind::N && !self.service.enable_night_shift {
                        tracing::warn!(
                            employee = %employee.name,
                            date = %date,
                            "preferencia fija nocturna con turno noche deshabilitado; se omite"
                        );
                        continue;
                    }

                    let (rest_ok, over_max, under_min) = match states.get(&employee.id) {
                        Some(state) => (
                            state.satisfies_rest_window(date, kind, min_rest),
                            !state.is_resting()
                                && state.consecutive_work_days + 1
                                    > limits.max_consecutive_work_days,
                            state.is_resting()
                                && state.consecutive_rest_days
                                    < limits.min_consecutive_days_off_required_before_work,
                        ),
                        None => (true, false, false),
                    };

                    if !rest_ok {
                        tracing::warn!(
                            employee = %employee.name,
                            date = %date,
                            shift = kind.code(),
                            "preferencia fija viola el descanso mínimo entre turnos; se omite"
                        );
                        continue;
                    }

                    if holiday && !weekend {
                        self.place(
                            employee,
                            date,
                            ShiftKind::F,
                            notes::fixed_weekly_covered_by_holiday(kind),
                            board,
                            states,
                            sheet,
                        );
                        continue;
                    }

                    if over_max || under_min {
                        tracing::warn!(
                            employee = %employee.name,
                            date = %date,
                            shift = kind.code(),
                            "la preferencia fija fuerza una violación de consecutividad"
                        );
                    }
                    board.remaining_need.take_one(kind);
                    self.place(
                        employee,
                        date,
                        kind,
                        notes::fixed_weekly_work(kind),
                        board,
                        states,
                        sheet,
                    );
                }
            }
        }
    }

    /// Layer D: greedy demand coverage, kinds in M, T, N order, candidates
    /// ranked by the lexicographic key with a random tail.
    fn cover_demand(
        &self,
        date: NaiveDate,
        weekend_or_holiday: bool,
        board: &mut DayBoard,
        states: &mut HashMap<Uuid, EmployeeState>,
        sheet: &mut AttemptSheet,
        rng: &mut StdRng,
    ) {
        let limits = &self.service.consecutiveness_rules;
        let min_rest = self.config.min_rest_hours_between_shifts;
        let target = self
            .service
            .effective_weekend_target(self.config.default_target_complete_weekends_off);

        for kind in ShiftKind::WORK_KINDS {
            if kind == ShiftKind::N && !self.service.enable_night_shift {
                continue;
            }
            let need = board.remaining_need.get(kind);
            if need == 0 {
                continue;
            }

            let mut ranked: Vec<(CandidateKey, &Employee)> = Vec::new();
            for &employee in &self.roster {
                if board.is_processed(employee.id) {
                    continue;
                }
                // fixed-pattern staff never absorb rotation demand; a skipped
                // pattern day falls through to residual rest
                if employee
                    .preferences
                    .work_pattern
                    .and_then(|pattern| pattern.weekday_shift())
                    .is_some()
                {
                    continue;
                }
                let Some(state) = states.get(&employee.id) else {
                    continue;
                };
                if !state.satisfies_rest_window(date, kind, min_rest) {
                    continue;
                }
                if state.consecutive_work_days >= limits.max_consecutive_work_days {
                    continue;
                }
                if state.is_resting()
                    && state.consecutive_rest_days
                        < limits.min_consecutive_days_off_required_before_work
                {
                    continue;
                }
                let key = self.candidate_key(
                    employee,
                    state,
                    weekend_or_holiday,
                    target,
                    rng.gen::<u32>(),
                );
                ranked.push((key, employee));
            }
            ranked.sort_by(|a, b| a.0.cmp(&b.0));

            for (_, employee) in ranked.into_iter().take(need as usize) {
                if let Some(state) = states.get(&employee.id) {
                    if !state.is_resting()
                        && state.consecutive_work_days + 1 > limits.preferred_consecutive_work_days
                    {
                        tracing::debug!(
                            employee = %employee.name,
                            date = %date,
                            "el bloque de trabajo supera la longitud preferida"
                        );
                    }
                    if state.is_resting()
                        && state.consecutive_rest_days > 0
                        && state.consecutive_rest_days < limits.preferred_consecutive_days_off
                    {
                        tracing::debug!(
                            employee = %employee.name,
                            date = %date,
                            "se interrumpe un descanso más corto que el preferido"
                        );
                    }
                }
                board.remaining_need.take_one(kind);
                self.place(
                    employee,
                    date,
                    kind,
                    notes::work_shift(kind),
                    board,
                    states,
                    sheet,
                );
            }
        }
    }

    fn candidate_key(
        &self,
        employee: &Employee,
        state: &EmployeeState,
        weekend_or_holiday: bool,
        weekend_target: u32,
        tiebreak: u32,
    ) -> CandidateKey {
        let limits = &self.service.consecutiveness_rules;
        let prefers_weekends = employee.preferences.prefers_weekend_work;

        // breaking a spell that already reached the preferred rest length is
        // cheaper than cutting a short one
        let rest_spell_not_done =
            u8::from(state.consecutive_rest_days < limits.preferred_consecutive_days_off);
        let outside_short_block = u8::from(
            !(state.consecutive_work_days > 0
                && state.consecutive_work_days < limits.preferred_consecutive_work_days),
        );
        let weekend_seeker = if weekend_or_holiday && weekend_target > 0 {
            u8::from(!prefers_weekends)
        } else {
            0
        };
        let weekend_bias = if weekend_or_holiday {
            u8::from(!prefers_weekends)
        } else {
            0
        };
        let (working_flag, streak) = if state.is_resting() {
            (0, u32::MAX - state.consecutive_rest_days)
        } else {
            (1, state.consecutive_work_days)
        };

        (
            rest_spell_not_done,
            outside_short_block,
            weekend_seeker,
            state.shifts_this_month,
            weekend_bias,
            working_flag,
            streak,
            tiebreak,
        )
    }

    /// Layer E: everyone still unprocessed rests. On weekend days the note
    /// is upgraded to the weekend-objective tag when the other half of the
    /// Saturday-Sunday pair is off (or still empty) within the month.
    fn assign_residual_rest(
        &self,
        date: NaiveDate,
        weekend: bool,
        holiday: bool,
        board: &mut DayBoard,
        states: &mut HashMap<Uuid, EmployeeState>,
        sheet: &mut AttemptSheet,
    ) {
        let target = self
            .service
            .effective_weekend_target(self.config.default_target_complete_weekends_off);

        for &employee in &self.roster {
            if board.is_processed(employee.id) {
                continue;
            }
            let kind = if holiday { ShiftKind::F } else { ShiftKind::D };
            let note = if target > 0 && weekend && self.weekend_pair_resting(employee.id, date, sheet)
            {
                notes::weekend_objective_rest(holiday)
            } else {
                notes::residual_rest(holiday)
            };
            self.place(employee, date, kind, note.to_string(), board, states, sheet);
        }
    }

    /// Whether the other day of this Saturday-Sunday pair, within the month,
    /// is already off or still unassigned.
    fn weekend_pair_resting(&self, employee_id: Uuid, date: NaiveDate, sheet: &AttemptSheet) -> bool {
        let other = match date.weekday() {
            Weekday::Sat => date.succ_opt(),
            Weekday::Sun => date.pred_opt(),
            _ => None,
        };
        let Some(other) = other else {
            return false;
        };
        if other.month() != date.month() || other.year() != date.year() {
            return false;
        }
        sheet
            .kind_on(employee_id, other)
            .map_or(true, |kind| kind.is_off())
    }
}
