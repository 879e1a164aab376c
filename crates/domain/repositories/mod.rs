pub mod interests;
pub mod ratings;
pub mod storage;
pub mod tourish_plans;
