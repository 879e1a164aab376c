pub mod instruction_types;
pub mod interest_statuses;
pub mod plan_statuses;
pub mod receipt_statuses;
pub mod sort_order;
