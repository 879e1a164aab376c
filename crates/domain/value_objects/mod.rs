pub mod enums;
pub mod instructions;
pub mod pagination;
pub mod plan_changes;
pub mod plan_query;
pub mod ratings;
pub mod response;
pub mod service_schedules;
pub mod storage;
pub mod tourish_plans;
