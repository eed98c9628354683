use shared::DomainResult;

use crate::domain::entities::{Employee, SchedulePeriod, ScheduleOutcome, Service};
use crate::domain::repositories::{HolidayProvider, ScheduleStore};
use crate::domain::rules::SchedulingRules;
use crate::domain::services::generator::ScheduleGenerator;

/// Wires the generator to its collaborators: pulls the target month's
/// holidays and the previous month's published schedule, then generates.
pub struct MonthlyPlanner<'a> {
    holiday_provider: &'a dyn HolidayProvider,
    schedule_store: &'a dyn ScheduleStore,
}

impl<'a> MonthlyPlanner<'a> {
    pub fn new(
        holiday_provider: &'a dyn HolidayProvider,
        schedule_store: &'a dyn ScheduleStore,
    ) -> Self {
        Self {
            holiday_provider,
            schedule_store,
        }
    }

    pub fn plan(
        &self,
        service: &Service,
        employees: &[Employee],
        period: SchedulePeriod,
        config: &SchedulingRules,
    ) -> DomainResult<ScheduleOutcome> {
        let holidays = self
            .holiday_provider
            .holidays_for(period.year(), period.month())?;

        let previous = period.previous();
        let previous_shifts =
            self.schedule_store
                .published_shifts(previous.year(), previous.month(), service.id)?;

        tracing::info!(
            service = %service.name,
            period = %period.month_scope(),
            holidays = holidays.len(),
            has_previous = previous_shifts.is_some(),
            "planificando el mes"
        );

        let generator = ScheduleGenerator::new(service, employees, &holidays, config);
        Ok(generator.generate(period, previous_shifts.as_deref()))
    }
}
