pub mod employee;
pub mod evaluation;
pub mod period;
pub mod service;
pub mod shift;

pub use employee::{Employee, EmployeePreferences, FixedAssignment, FixedShiftTiming, WorkPattern};
pub use evaluation::{ScheduleOutcome, ScoreBreakdown, Violation};
pub use period::SchedulePeriod;
pub use service::{ConsecutivenessRules, Service, ShiftDemand, StaffingNeeds};
pub use shift::AssignedShift;
