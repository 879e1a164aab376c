use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReceiptStatus {
    #[default]
    Created,
    Pending,
    Completed,
    Cancelled,
}

impl Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ReceiptStatus::Created => "created",
            ReceiptStatus::Pending => "pending",
            ReceiptStatus::Completed => "completed",
            ReceiptStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

impl ReceiptStatus {
    /// Receipts whose tickets count toward monthly sales rankings.
    pub fn sales_statuses() -> [ReceiptStatus; 2] {
        [ReceiptStatus::Pending, ReceiptStatus::Completed]
    }
}
