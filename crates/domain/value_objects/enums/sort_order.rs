use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    /// Listing endpoints sort ascending unless the caller asks for exactly `desc`.
    pub fn from_direction(direction: Option<&str>) -> Self {
        match direction {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}
