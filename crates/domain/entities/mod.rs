pub mod categories;
pub mod instructions;
pub mod interests;
pub mod ratings;
pub mod service_schedules;
pub mod tourish_plans;
pub mod tourish_schedules;
