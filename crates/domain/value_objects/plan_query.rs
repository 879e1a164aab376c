use std::collections::HashMap;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::value_objects::{enums::sort_order::SortOrder, pagination::Pagination};

/// `sortBy` value that ranks plans by recent ticket sales instead of a column.
pub const TOTAL_TICKET_IN_MONTH: &str = "totalTicketInMonth";

/// Raw query-string parameters accepted by the plan listing endpoints.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanSearchParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub category_string: Option<String>,
    pub starting_point: Option<String>,
    pub end_point: Option<String>,
    pub starting_date: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSortField {
    TourName,
    StartingPoint,
    EndPoint,
    CreateDate,
    UpdateDate,
}

impl PlanSortField {
    /// Unknown column names are rejected rather than reflected onto the table.
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "tourName" | "tour_name" => Some(PlanSortField::TourName),
            "startingPoint" | "starting_point" => Some(PlanSortField::StartingPoint),
            "endPoint" | "end_point" => Some(PlanSortField::EndPoint),
            "createDate" | "create_date" => Some(PlanSortField::CreateDate),
            "updateDate" | "update_date" => Some(PlanSortField::UpdateDate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOrdering {
    Column {
        field: PlanSortField,
        order: SortOrder,
    },
    TotalTicketInMonth,
}

impl Default for PlanOrdering {
    fn default() -> Self {
        PlanOrdering::Column {
            field: PlanSortField::CreateDate,
            order: SortOrder::Desc,
        }
    }
}

impl PlanOrdering {
    pub fn from_params(sort_by: Option<&str>, sort_direction: Option<&str>) -> Self {
        match sort_by {
            Some(TOTAL_TICKET_IN_MONTH) => PlanOrdering::TotalTicketInMonth,
            Some(column) => match PlanSortField::from_column(column) {
                Some(field) => PlanOrdering::Column {
                    field,
                    order: SortOrder::from_direction(sort_direction),
                },
                None => PlanOrdering::default(),
            },
            None => PlanOrdering::default(),
        }
    }
}

/// Bounds on the summed line-item price of a plan. The upper bound only
/// applies together with a lower bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub from: f64,
    pub to: Option<f64>,
}

impl PriceRange {
    pub fn from_params(price_from: Option<f64>, price_to: Option<f64>) -> Option<Self> {
        let from = price_from.filter(|value| value.is_finite())?;
        let to = price_to.filter(|value| value.is_finite());

        match to {
            Some(to) if to < from => None,
            _ => Some(Self { from, to }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanListScope {
    /// Customer listing: only plans with a confirmed schedule.
    Public,
    /// Staff listing: every plan, interest lists narrowed to the caller.
    Authority { user_id: Uuid },
}

/// Typed form of [`PlanSearchParams`]. Every filter is optional and malformed
/// input simply leaves the filter out.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanQuery {
    pub scope: PlanListScope,
    pub search: Option<String>,
    pub category: Option<String>,
    pub category_names: Option<Vec<String>>,
    pub starting_point: Option<String>,
    pub end_point: Option<String>,
    pub starting_date: Option<StartingDay>,
    pub price_range: Option<PriceRange>,
    pub ordering: PlanOrdering,
    pub pagination: Pagination,
}

impl PlanQuery {
    pub fn from_params(
        params: PlanSearchParams,
        scope: PlanListScope,
        default_page_size: i64,
    ) -> Self {
        Self {
            scope,
            search: non_empty(params.search),
            category: non_empty(params.category),
            category_names: params
                .category_string
                .as_deref()
                .and_then(parse_category_names),
            starting_point: non_empty(params.starting_point),
            end_point: non_empty(params.end_point),
            starting_date: params.starting_date.as_deref().and_then(parse_starting_date),
            price_range: PriceRange::from_params(params.price_from, params.price_to),
            ordering: PlanOrdering::from_params(
                params.sort_by.as_deref(),
                params.sort_direction.as_deref(),
            ),
            pagination: Pagination::new(params.page, params.page_size, default_page_size),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// `categoryString` carries a JSON array of category names.
pub fn parse_category_names(raw: &str) -> Option<Vec<String>> {
    let names: Vec<String> = serde_json::from_str(raw).ok()?;
    let names: Vec<String> = names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .collect();

    if names.is_empty() { None } else { Some(names) }
}

const JS_DATE_FORMATS: [&str; 2] = ["%a %b %d %Y %H:%M:%S GMT%z", "%a %b %d %Y %H:%M:%S GMT%:z"];
const ISO_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%:z"];

/// A calendar day as the caller sees it, in the offset they sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingDay {
    pub date: NaiveDate,
    pub offset: FixedOffset,
}

impl StartingDay {
    /// Half-open UTC bounds `[start, end)` of the day in the caller's offset.
    pub fn utc_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let next_day = self.date.checked_add_days(Days::new(1))?;
        let start = self
            .offset
            .from_local_datetime(&self.date.and_time(NaiveTime::MIN))
            .single()?;
        let end = self
            .offset
            .from_local_datetime(&next_day.and_time(NaiveTime::MIN))
            .single()?;

        Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
    }
}

/// Accepts the browser `Date.toString()` shape (`Tue Mar 12 2024 00:00:00
/// GMT+0700 (Indochina Time)`) and ISO-8601 with an offset.
pub fn parse_starting_date(raw: &str) -> Option<StartingDay> {
    let raw = raw.trim();
    let without_zone_name = raw.split(" (").next().unwrap_or(raw).trim();

    let parsed = JS_DATE_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(without_zone_name, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok())
        .or_else(|| {
            ISO_OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        });

    parsed.map(|date_time: DateTime<FixedOffset>| StartingDay {
        date: date_time.date_naive(),
        offset: *date_time.offset(),
    })
}

/// Half-open window covering the previous and the current calendar month.
pub fn ticket_sales_window(now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_of_month = now
        .date_naive()
        .checked_sub_days(Days::new(u64::from(now.day0())))?;
    let start = start_of_month.checked_sub_months(Months::new(1))?;
    let end = start_of_month.checked_add_months(Months::new(1))?;

    Some((
        start.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(NaiveTime::MIN).and_utc(),
    ))
}

/// Plans ranked by tickets sold in the sales window, best seller first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSalesRanking {
    entries: Vec<(Uuid, i64)>,
}

impl TicketSalesRanking {
    /// Plans without sales are dropped; ties fall back to the plan id so the order is stable.
    pub fn new(totals: impl IntoIterator<Item = (Uuid, i64)>) -> Self {
        let mut entries: Vec<(Uuid, i64)> = totals
            .into_iter()
            .filter(|(_, total)| *total > 0)
            .collect();
        entries.sort_by(|(left_id, left), (right_id, right)| {
            right.cmp(left).then_with(|| left_id.cmp(right_id))
        });

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn plan_ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|(plan_id, _)| *plan_id).collect()
    }

    /// Keeps only ranked items and orders them by descending sales.
    pub fn order_by_sales<T>(&self, items: Vec<T>, plan_id: impl Fn(&T) -> Uuid) -> Vec<T> {
        let positions: HashMap<Uuid, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, (id, _))| (*id, position))
            .collect();

        let mut ranked: Vec<(usize, T)> = items
            .into_iter()
            .filter_map(|item| {
                positions
                    .get(&plan_id(&item))
                    .map(|position| (*position, item))
            })
            .collect();
        ranked.sort_by_key(|(position, _)| *position);

        ranked.into_iter().map(|(_, item)| item).collect()
    }
}
