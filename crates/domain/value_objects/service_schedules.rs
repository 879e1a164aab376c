use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::service_schedules::{
        InsertEatScheduleEntity, InsertMovingScheduleEntity, InsertStayingScheduleEntity,
    },
    value_objects::storage::{
        BlobWrite, EAT_SCHEDULE_CONTAINER, MISSING_DESCRIPTION_TEXT, MOVING_SCHEDULE_CONTAINER,
        STAYING_SCHEDULE_CONTAINER, blob_name, blob_name_from_key,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceScheduleKind {
    Eat,
    Staying,
    Moving,
}

impl fmt::Display for ServiceScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ServiceScheduleKind::Eat => "eating",
            ServiceScheduleKind::Staying => "staying",
            ServiceScheduleKind::Moving => "moving",
        };
        write!(f, "{}", kind)
    }
}

impl ServiceScheduleKind {
    pub fn container(&self) -> &'static str {
        match self {
            ServiceScheduleKind::Eat => EAT_SCHEDULE_CONTAINER,
            ServiceScheduleKind::Staying => STAYING_SCHEDULE_CONTAINER,
            ServiceScheduleKind::Moving => MOVING_SCHEDULE_CONTAINER,
        }
    }

    /// Label reported in `serviceChangeList`.
    pub fn change_label(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error)]
#[error("{kind} schedule batch is malformed: {source}")]
pub struct ScheduleBatchError {
    pub kind: ServiceScheduleKind,
    #[source]
    pub source: serde_json::Error,
}

/// Blank input and a JSON `null` both mean an empty batch.
pub fn parse_batch<T>(kind: ServiceScheduleKind, raw: Option<&str>) -> Result<Vec<T>, ScheduleBatchError>
where
    T: DeserializeOwned,
{
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Vec::new()),
    };

    serde_json::from_str::<Option<Vec<T>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| ScheduleBatchError { kind, source })
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EatScheduleItem {
    /// Id of the row this item replaces, used to carry its description blob over.
    pub id: Option<String>,
    pub place_name: Option<String>,
    pub address: Option<String>,
    pub support_number: Option<String>,
    pub restaurant_id: Option<Uuid>,
    pub single_price: Option<f64>,
    pub description: Option<String>,
}

impl EatScheduleItem {
    pub fn to_insert_entity(&self, tourish_plan_id: Uuid, now: DateTime<Utc>) -> InsertEatScheduleEntity {
        InsertEatScheduleEntity {
            tourish_plan_id,
            place_name: self.place_name.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            support_number: self.support_number.clone().unwrap_or_default(),
            restaurant_id: self.restaurant_id,
            single_price: self.single_price,
            create_date: now,
            update_date: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StayingScheduleItem {
    pub id: Option<String>,
    pub place_name: Option<String>,
    pub address: Option<String>,
    pub support_number: Option<String>,
    pub rest_house_branch_id: Option<Uuid>,
    pub rest_house_type: Option<i32>,
    pub single_price: Option<f64>,
    pub description: Option<String>,
}

impl StayingScheduleItem {
    pub fn to_insert_entity(
        &self,
        tourish_plan_id: Uuid,
        now: DateTime<Utc>,
    ) -> InsertStayingScheduleEntity {
        InsertStayingScheduleEntity {
            tourish_plan_id,
            place_name: self.place_name.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            support_number: self.support_number.clone().unwrap_or_default(),
            rest_house_branch_id: self.rest_house_branch_id,
            rest_house_type: self.rest_house_type,
            single_price: self.single_price,
            create_date: now,
            update_date: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovingScheduleItem {
    pub id: Option<String>,
    pub driver_name: Option<String>,
    pub vehicle_plate: Option<String>,
    pub branch_name: Option<String>,
    pub vehicle_type: Option<i32>,
    pub transport_id: Option<Uuid>,
    pub phone_number: Option<String>,
    pub starting_place: Option<String>,
    pub heading_place: Option<String>,
    pub single_price: Option<f64>,
    pub description: Option<String>,
}

impl MovingScheduleItem {
    pub fn to_insert_entity(
        &self,
        tourish_plan_id: Uuid,
        now: DateTime<Utc>,
    ) -> InsertMovingScheduleEntity {
        InsertMovingScheduleEntity {
            tourish_plan_id,
            driver_name: self.driver_name.clone().unwrap_or_default(),
            vehicle_plate: self.vehicle_plate.clone().unwrap_or_default(),
            branch_name: self.branch_name.clone().unwrap_or_default(),
            vehicle_type: self.vehicle_type,
            transport_id: self.transport_id,
            phone_number: self.phone_number.clone().unwrap_or_default(),
            starting_place: self.starting_place.clone().unwrap_or_default(),
            heading_place: self.heading_place.clone().unwrap_or_default(),
            single_price: self.single_price,
            create_date: now,
            update_date: now,
        }
    }
}

/// The three line-item batches of a create or update request, already parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceScheduleBatches {
    pub eat: Vec<EatScheduleItem>,
    pub staying: Vec<StayingScheduleItem>,
    pub moving: Vec<MovingScheduleItem>,
}

impl ServiceScheduleBatches {
    pub fn parse(
        eat: Option<&str>,
        moving: Option<&str>,
        staying: Option<&str>,
    ) -> Result<Self, ScheduleBatchError> {
        Ok(Self {
            eat: parse_batch(ServiceScheduleKind::Eat, eat)?,
            staying: parse_batch(ServiceScheduleKind::Staying, staying)?,
            moving: parse_batch(ServiceScheduleKind::Moving, moving)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.eat.is_empty() && self.staying.is_empty() && self.moving.is_empty()
    }
}

/// Batches an update asked to replace. A kind is `Some` when its request string
/// was non-empty, even if it parsed to no items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceScheduleReplacement {
    pub eat: Option<Vec<EatScheduleItem>>,
    pub staying: Option<Vec<StayingScheduleItem>>,
    pub moving: Option<Vec<MovingScheduleItem>>,
}

impl ServiceScheduleReplacement {
    pub fn parse(
        eat: Option<&str>,
        moving: Option<&str>,
        staying: Option<&str>,
    ) -> Result<Self, ScheduleBatchError> {
        fn replaced<T: DeserializeOwned>(
            kind: ServiceScheduleKind,
            raw: Option<&str>,
        ) -> Result<Option<Vec<T>>, ScheduleBatchError> {
            match raw.filter(|raw| !raw.is_empty()) {
                Some(raw) => parse_batch(kind, Some(raw)).map(Some),
                None => Ok(None),
            }
        }

        Ok(Self {
            eat: replaced(ServiceScheduleKind::Eat, eat)?,
            staying: replaced(ServiceScheduleKind::Staying, staying)?,
            moving: replaced(ServiceScheduleKind::Moving, moving)?,
        })
    }

    /// Replaced kinds in reporting order: staying, moving, eating.
    pub fn changed_kinds(&self) -> Vec<ServiceScheduleKind> {
        let mut kinds = Vec::new();
        if self.staying.is_some() {
            kinds.push(ServiceScheduleKind::Staying);
        }
        if self.moving.is_some() {
            kinds.push(ServiceScheduleKind::Moving);
        }
        if self.eat.is_some() {
            kinds.push(ServiceScheduleKind::Eat);
        }
        kinds
    }

    pub fn to_batches(&self) -> ServiceScheduleBatches {
        ServiceScheduleBatches {
            eat: self.eat.clone().unwrap_or_default(),
            staying: self.staying.clone().unwrap_or_default(),
            moving: self.moving.clone().unwrap_or_default(),
        }
    }
}

/// Ids of the rows inserted for each batch, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertedServiceScheduleIds {
    pub eat: Vec<Uuid>,
    pub staying: Vec<Uuid>,
    pub moving: Vec<Uuid>,
}

/// A line item that was just written, paired with what the request said about it.
pub struct LineItemBlob<'a> {
    pub old_id: Option<&'a str>,
    pub description: Option<&'a str>,
    pub new_id: Uuid,
}

pub fn line_item_blob_writes(kind: ServiceScheduleKind, item: LineItemBlob<'_>) -> Vec<BlobWrite> {
    let container = kind.container();
    let new_key = blob_name(item.new_id);
    let description = item.description.filter(|text| !text.is_empty());

    match item.old_id.filter(|old_id| !old_id.is_empty()) {
        Some(old_id) => {
            let mut writes = vec![BlobWrite::Rename {
                container,
                from: blob_name_from_key(old_id),
                to: new_key.clone(),
            }];
            if let Some(text) = description {
                writes.push(BlobWrite::upload(container, new_key, text.to_string()));
            }
            writes
        }
        None => vec![BlobWrite::upload(
            container,
            new_key,
            description.unwrap_or(MISSING_DESCRIPTION_TEXT).to_string(),
        )],
    }
}

/// Blob writes for every inserted line item, eating first, then staying, then moving.
pub fn batch_blob_writes(
    batches: &ServiceScheduleBatches,
    inserted: &InsertedServiceScheduleIds,
) -> Vec<BlobWrite> {
    let eat = batches.eat.iter().zip(&inserted.eat).flat_map(|(item, id)| {
        line_item_blob_writes(
            ServiceScheduleKind::Eat,
            LineItemBlob {
                old_id: item.id.as_deref(),
                description: item.description.as_deref(),
                new_id: *id,
            },
        )
    });
    let staying = batches
        .staying
        .iter()
        .zip(&inserted.staying)
        .flat_map(|(item, id)| {
            line_item_blob_writes(
                ServiceScheduleKind::Staying,
                LineItemBlob {
                    old_id: item.id.as_deref(),
                    description: item.description.as_deref(),
                    new_id: *id,
                },
            )
        });
    let moving = batches
        .moving
        .iter()
        .zip(&inserted.moving)
        .flat_map(|(item, id)| {
            line_item_blob_writes(
                ServiceScheduleKind::Moving,
                LineItemBlob {
                    old_id: item.id.as_deref(),
                    description: item.description.as_deref(),
                    new_id: *id,
                },
            )
        });

    eat.chain(staying).chain(moving).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_eat_batch() {
        let raw = r#"[{"placeName":"Bep Viet","address":"12 Le Loi","supportNumber":"0909","singlePrice":120000,"description":"Lunch"}]"#;
        let items: Vec<EatScheduleItem> = parse_batch(ServiceScheduleKind::Eat, Some(raw)).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].place_name.as_deref(), Some("Bep Viet"));
        assert_eq!(items[0].single_price, Some(120000.0));
        assert_eq!(items[0].id, None);
    }

    #[test]
    fn blank_and_null_batches_are_empty() {
        for raw in [None, Some(""), Some("   "), Some("null"), Some("[]")] {
            let items: Vec<MovingScheduleItem> =
                parse_batch(ServiceScheduleKind::Moving, raw).unwrap();
            assert!(items.is_empty(), "input {raw:?}");
        }
    }

    #[test]
    fn malformed_batch_reports_its_kind() {
        let err = ServiceScheduleBatches::parse(None, None, Some("{not json")).unwrap_err();
        assert_eq!(err.kind, ServiceScheduleKind::Staying);
        assert!(err.to_string().starts_with("staying schedule batch is malformed"));
    }

    #[test]
    fn wrongly_typed_field_is_malformed() {
        let raw = r#"[{"singlePrice":"cheap"}]"#;
        let result: Result<Vec<EatScheduleItem>, _> = parse_batch(ServiceScheduleKind::Eat, Some(raw));
        assert!(result.is_err());
    }

    #[test]
    fn new_item_without_description_gets_placeholder() {
        let new_id = Uuid::new_v4();
        let writes = line_item_blob_writes(
            ServiceScheduleKind::Eat,
            LineItemBlob {
                old_id: None,
                description: None,
                new_id,
            },
        );

        assert_eq!(
            writes,
            vec![BlobWrite::upload(
                EAT_SCHEDULE_CONTAINER,
                blob_name(new_id),
                MISSING_DESCRIPTION_TEXT.to_string(),
            )]
        );
    }

    #[test]
    fn replaced_item_moves_its_blob_and_keeps_it_without_new_text() {
        let old_id = Uuid::new_v4().to_string();
        let new_id = Uuid::new_v4();
        let writes = line_item_blob_writes(
            ServiceScheduleKind::Moving,
            LineItemBlob {
                old_id: Some(&old_id),
                description: Some(""),
                new_id,
            },
        );

        assert_eq!(
            writes,
            vec![BlobWrite::Rename {
                container: MOVING_SCHEDULE_CONTAINER,
                from: format!("{old_id}.txt"),
                to: blob_name(new_id),
            }]
        );
    }

    #[test]
    fn replaced_item_with_text_is_renamed_then_overwritten() {
        let new_id = Uuid::new_v4();
        let writes = line_item_blob_writes(
            ServiceScheduleKind::Staying,
            LineItemBlob {
                old_id: Some("old"),
                description: Some("Sea view"),
                new_id,
            },
        );

        assert_eq!(writes.len(), 2);
        assert!(matches!(writes[0], BlobWrite::Rename { .. }));
        assert_eq!(
            writes[1],
            BlobWrite::upload(STAYING_SCHEDULE_CONTAINER, blob_name(new_id), "Sea view".to_string())
        );
    }

    #[test]
    fn replacement_reports_staying_moving_eating() {
        let replacement =
            ServiceScheduleReplacement::parse(Some("[]"), Some("null"), Some("[]")).unwrap();
        assert_eq!(
            replacement.changed_kinds(),
            vec![
                ServiceScheduleKind::Staying,
                ServiceScheduleKind::Moving,
                ServiceScheduleKind::Eat,
            ]
        );

        let untouched = ServiceScheduleReplacement::parse(None, Some(""), None).unwrap();
        assert!(untouched.changed_kinds().is_empty());
        assert_eq!(
            ServiceScheduleKind::Eat.change_label(),
            "eating".to_string()
        );
    }

    #[test]
    fn batch_writes_follow_inserted_ids() {
        let batches = ServiceScheduleBatches {
            eat: vec![EatScheduleItem::default()],
            staying: vec![],
            moving: vec![MovingScheduleItem {
                description: Some("Bus".to_string()),
                ..MovingScheduleItem::default()
            }],
        };
        let inserted = InsertedServiceScheduleIds {
            eat: vec![Uuid::new_v4()],
            staying: vec![],
            moving: vec![Uuid::new_v4()],
        };

        let writes = batch_blob_writes(&batches, &inserted);
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].container(), EAT_SCHEDULE_CONTAINER);
        assert_eq!(writes[1].container(), MOVING_SCHEDULE_CONTAINER);
    }
}
