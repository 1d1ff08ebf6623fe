// Event domain types
//
// These types represent the Event entity, its populated form and the rules
// applied when an event is created (derived fields, category parsing).

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::category::Category;
use crate::error::{CatalogError, Result};

/// Smallest accepted event capacity.
pub const MIN_CAPACITY: i32 = 10;
/// Largest accepted event capacity.
pub const MAX_CAPACITY: i32 = 2000;
/// Capacity used when the caller does not supply one.
pub const DEFAULT_CAPACITY: i32 = 1000;

/// Event is a scheduled happening that can belong to several categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Internal identity.
    pub id: Uuid,
    /// Human-readable external ID, e.g. `ABC-42`.
    #[serde(rename = "eventID")]
    #[cfg_attr(feature = "openapi", schema(example = "ABC-42"))]
    pub event_id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    /// Duration in minutes.
    pub duration: i32,
    /// Duration as text, e.g. `1 hour(s) 30 minutes`. Computed at creation.
    pub display_duration: String,
    /// `start_date + duration`. Computed at creation.
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub image: String,
    pub capacity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets_available: Option<i32>,
    /// Internal IDs of the categories matched at creation time.
    pub category_list: Vec<Uuid>,
    /// External category IDs exactly as supplied by the caller.
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Event with `categoryList` resolved to full category records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EventWithCategories {
    pub id: Uuid,
    #[serde(rename = "eventID")]
    pub event_id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub duration: i32,
    pub display_duration: String,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub image: String,
    pub capacity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets_available: Option<i32>,
    pub category_list: Vec<Category>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl EventWithCategories {
    /// Build the populated form. References that no longer resolve are skipped.
    pub fn populate(event: Event, lookup: impl Fn(&Uuid) -> Option<Category>) -> Self {
        let category_list = event.category_list.iter().filter_map(lookup).collect();
        Self {
            id: event.id,
            event_id: event.event_id,
            name: event.name,
            start_date: event.start_date,
            duration: event.duration,
            display_duration: event.display_duration,
            end_date: event.end_date,
            description: event.description,
            is_active: event.is_active,
            image: event.image,
            capacity: event.capacity,
            tickets_available: event.tickets_available,
            category_list,
            categories: event.categories,
            created_at: event.created_at,
        }
    }
}

/// Validated input for creating an event, with derived fields computed.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub duration: i32,
    pub display_duration: String,
    pub end_date: DateTime<Utc>,
    pub image: String,
    pub capacity: i32,
    pub tickets_available: Option<i32>,
    pub categories: Vec<String>,
}

/// Raw event fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Option<String>,
    pub start_date_time: Option<String>,
    pub duration_in_minutes: Option<i32>,
    pub image: Option<String>,
    pub capacity: Option<i32>,
    pub tickets_available: Option<i32>,
}

impl NewEvent {
    /// Validate a draft and compute the derived fields.
    ///
    /// `isActive` is not part of the draft: events always start active.
    pub fn from_draft(draft: EventDraft) -> Result<Self> {
        let name = match draft.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(CatalogError::validation("name: Path `name` is required.")),
        };

        let start_date = match draft.start_date_time.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_start_date(raw)?,
            _ => {
                return Err(CatalogError::validation(
                    "startDate: Path `startDate` is required.",
                ))
            }
        };

        let duration = draft.duration_in_minutes.ok_or_else(|| {
            CatalogError::validation("duration: Path `duration` is required.")
        })?;
        if duration < 0 {
            return Err(CatalogError::validation(format!(
                "duration: {} is not a valid number of minutes",
                duration
            )));
        }

        let capacity = validate_capacity(draft.capacity)?;

        Ok(Self {
            name,
            description: draft.description,
            start_date,
            duration,
            display_duration: display_duration(duration),
            end_date: end_date(start_date, duration),
            image: draft.image.unwrap_or_default(),
            capacity,
            tickets_available: draft.tickets_available,
            categories: parse_category_ids(draft.categories.as_deref().unwrap_or_default()),
        })
    }
}

/// Split a caller-supplied category field into external IDs.
///
/// A value containing a comma is split on every comma; anything else is a
/// single ID. Pieces are kept verbatim, so `"A, B"` yields `" B"`, which
/// matches no category. Blank input yields no IDs.
pub fn parse_category_ids(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    if raw.contains(',') {
        raw.split(',').map(str::to_string).collect()
    } else {
        vec![raw.to_string()]
    }
}

/// Format a duration as `"{hours} hour(s) {minutes} minutes"`.
pub fn display_duration(minutes: i32) -> String {
    format!("{} hour(s) {} minutes", minutes / 60, minutes % 60)
}

/// Start date plus duration.
pub fn end_date(start: DateTime<Utc>, minutes: i32) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(minutes))
}

/// Resolve the capacity, applying the default and the allowed range.
pub fn validate_capacity(capacity: Option<i32>) -> Result<i32> {
    let capacity = capacity.unwrap_or(DEFAULT_CAPACITY);
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(CatalogError::validation(format!(
            "capacity: {} is outside the allowed range ({}-{})",
            capacity, MIN_CAPACITY, MAX_CAPACITY
        )));
    }
    Ok(capacity)
}

/// Parse a start date from RFC 3339 or from an HTML `datetime-local` value.
///
/// Values without an offset are taken as UTC.
pub fn parse_start_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(CatalogError::validation(format!(
        "startDate: Cast to date failed for value \"{}\"",
        raw
    )))
}

/// Case-insensitive keyword match on name and description.
/// An empty keyword matches everything.
pub fn event_matches(event: &Event, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return true;
    }
    event.name.to_lowercase().contains(&keyword)
        || event
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&keyword))
            .unwrap_or(false)
}
