pub mod interests;
pub mod ratings;
pub mod tourish_plans;
