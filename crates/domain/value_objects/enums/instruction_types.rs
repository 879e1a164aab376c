use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InstructionType {
    #[default]
    Price,
    Caution,
}

impl Display for InstructionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let instruction_type = match self {
            InstructionType::Price => "price",
            InstructionType::Caution => "caution",
        };
        write!(f, "{}", instruction_type)
    }
}

impl InstructionType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "caution" => InstructionType::Caution,
            _ => InstructionType::Price,
        }
    }
}
