use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InterestStatus {
    Creator,
    Modifier,
    User,
    #[default]
    Interest,
    NotInterested,
}

impl Display for InterestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            InterestStatus::Creator => "creator",
            InterestStatus::Modifier => "modifier",
            InterestStatus::User => "user",
            InterestStatus::Interest => "interest",
            InterestStatus::NotInterested => "not_interested",
        };
        write!(f, "{}", status)
    }
}

impl InterestStatus {
    /// Parses stored text, ignoring case and underscores so rows written as
    /// `Creator` or `NotInterested` still resolve. Unknown text yields `None`.
    pub fn from_str(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "creator" => Some(InterestStatus::Creator),
            "modifier" => Some(InterestStatus::Modifier),
            "user" => Some(InterestStatus::User),
            "interest" => Some(InterestStatus::Interest),
            "notinterested" => Some(InterestStatus::NotInterested),
            _ => None,
        }
    }

    /// Next state of the interest toggle. `None` means the role owns or works on
    /// the plan and cannot toggle.
    pub fn toggled(self) -> Option<InterestStatus> {
        match self {
            InterestStatus::Creator | InterestStatus::Modifier | InterestStatus::User => None,
            InterestStatus::Interest => Some(InterestStatus::NotInterested),
            InterestStatus::NotInterested => Some(InterestStatus::Interest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interest_and_not_interested_flip() {
        assert_eq!(
            InterestStatus::Interest.toggled(),
            Some(InterestStatus::NotInterested)
        );
        assert_eq!(
            InterestStatus::NotInterested.toggled(),
            Some(InterestStatus::Interest)
        );
    }

    #[test]
    fn plan_roles_cannot_toggle() {
        assert_eq!(InterestStatus::Creator.toggled(), None);
        assert_eq!(InterestStatus::Modifier.toggled(), None);
        assert_eq!(InterestStatus::User.toggled(), None);
    }

    #[test]
    fn stored_text_round_trips() {
        for status in [
            InterestStatus::Creator,
            InterestStatus::Modifier,
            InterestStatus::User,
            InterestStatus::Interest,
            InterestStatus::NotInterested,
        ] {
            assert_eq!(InterestStatus::from_str(&status.to_string()), Some(status));
        }
    }

    #[test]
    fn legacy_spellings_resolve_and_unknown_text_does_not() {
        assert_eq!(InterestStatus::from_str("Creator"), Some(InterestStatus::Creator));
        assert_eq!(
            InterestStatus::from_str("NotInterested"),
            Some(InterestStatus::NotInterested)
        );
        assert_eq!(InterestStatus::from_str("owner"), None);
        assert_eq!(InterestStatus::from_str(""), None);
    }
}
