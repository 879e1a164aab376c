use uuid::Uuid;

pub const TOURISH_CONTENT_CONTAINER: &str = "tourish-content-container";
pub const EAT_SCHEDULE_CONTAINER: &str = "eatschedule-content-container";
pub const MOVING_SCHEDULE_CONTAINER: &str = "movingschedule-content-container";
pub const STAYING_SCHEDULE_CONTAINER: &str = "stayingschedule-content-container";

/// Containers that hold descriptions. Nothing else is reachable by name.
pub const DESCRIPTION_CONTAINERS: [&str; 4] = [
    TOURISH_CONTENT_CONTAINER,
    EAT_SCHEDULE_CONTAINER,
    MOVING_SCHEDULE_CONTAINER,
    STAYING_SCHEDULE_CONTAINER,
];

pub fn description_container(name: &str) -> Option<&'static str> {
    DESCRIPTION_CONTAINERS
        .iter()
        .find(|container| **container == name)
        .copied()
}

pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Stored for a new line item that arrives without a description.
pub const MISSING_DESCRIPTION_TEXT: &str = "Không có thông tin";

pub fn blob_name(id: Uuid) -> String {
    format!("{id}.txt")
}

pub fn blob_name_from_key(key: &str) -> String {
    format!("{key}.txt")
}

/// A single write against the blob store, planned before it is executed so a
/// failed batch can be reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobWrite {
    Rename {
        container: &'static str,
        from: String,
        to: String,
    },
    Upload {
        container: &'static str,
        key: String,
        text: String,
    },
}

impl BlobWrite {
    pub fn upload(container: &'static str, key: String, text: String) -> Self {
        BlobWrite::Upload {
            container,
            key,
            text,
        }
    }

    pub fn container(&self) -> &'static str {
        match self {
            BlobWrite::Rename { container, .. } | BlobWrite::Upload { container, .. } => container,
        }
    }
}
