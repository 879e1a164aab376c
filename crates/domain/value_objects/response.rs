use serde::Serialize;
use uuid::Uuid;

pub mod message_codes {
    pub const PLAN_NOT_FOUND: &str = "C410";
    pub const PLAN_CREATED: &str = "I411";
    pub const PLAN_UPDATED: &str = "I412";
    pub const UPDATE_TARGET_MISSING: &str = "C412";
    pub const PLAN_DELETED: &str = "I413";
    pub const INTEREST_ADDED: &str = "I415";
    pub const INTEREST_REMOVED: &str = "I416";
    pub const INTEREST_LOCKED: &str = "C416";
    pub const RATING_SAVED: &str = "I417";
}

pub const RESULT_OK: i32 = 0;
pub const RESULT_REJECTED: i32 = 1;

/// What a plan update touched, reported back to the caller.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub service_change_list: Vec<String>,
    pub schedule_change_list: Vec<Uuid>,
    pub property_change_list: Vec<String>,
    pub is_new_schedule_added: bool,
}

/// Uniform envelope returned by every plan, interest and rating endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiResponse {
    #[serde(rename = "resultCd")]
    pub result_cd: i32,
    #[serde(rename = "MessageCode", skip_serializing_if = "Option::is_none")]
    pub message_code: Option<String>,
    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(rename = "returnId", skip_serializing_if = "Option::is_none")]
    pub return_id: Option<Uuid>,
    #[serde(rename = "Change", skip_serializing_if = "Option::is_none")]
    pub change: Option<ChangeSummary>,
}

impl ApiResponse {
    pub fn coded(result_cd: i32, message_code: &str) -> Self {
        Self {
            result_cd,
            message_code: Some(message_code.to_string()),
            data: None,
            count: None,
            return_id: None,
            change: None,
        }
    }

    pub fn ok(message_code: &str) -> Self {
        Self::coded(RESULT_OK, message_code)
    }

    pub fn rejected(message_code: &str) -> Self {
        Self::coded(RESULT_REJECTED, message_code)
    }

    pub fn data(data: serde_json::Value) -> Self {
        Self {
            result_cd: RESULT_OK,
            message_code: None,
            data: Some(data),
            count: None,
            return_id: None,
            change: None,
        }
    }

    pub fn page(data: serde_json::Value, count: i64) -> Self {
        Self {
            count: Some(count),
            ..Self::data(data)
        }
    }

    pub fn with_return_id(mut self, return_id: Uuid) -> Self {
        self.return_id = Some(return_id);
        self
    }

    pub fn with_change(mut self, change: ChangeSummary) -> Self {
        self.change = Some(change);
        self
    }
}
