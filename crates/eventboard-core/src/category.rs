// Category domain types
//
// These types represent the Category entity and its populated form.
// Used by storage, services and the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{CatalogError, Result};
use crate::event::Event;

/// Category groups events. Each category keeps back-references to the
/// events that declared it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Internal identity.
    pub id: Uuid,
    /// Human-readable external ID, e.g. `CMU-0042`.
    #[serde(rename = "categoryID")]
    #[cfg_attr(feature = "openapi", schema(example = "CMU-0042"))]
    pub category_id: String,
    /// Alphanumeric name.
    #[cfg_attr(feature = "openapi", schema(example = "Music"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image path or URL. Empty when not supplied.
    pub image: String,
    /// Internal IDs of events that reference this category.
    pub events_list: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Category with `eventsList` resolved to full event records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithEvents {
    pub id: Uuid,
    #[serde(rename = "categoryID")]
    pub category_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: String,
    /// Events referencing this category, in back-reference order.
    pub events_list: Vec<Event>,
    pub created_at: DateTime<Utc>,
}

impl CategoryWithEvents {
    /// Build the populated form. References that no longer resolve are skipped.
    pub fn populate(category: Category, lookup: impl Fn(&Uuid) -> Option<Event>) -> Self {
        let events_list = category.events_list.iter().filter_map(lookup).collect();
        Self {
            id: category.id,
            category_id: category.category_id,
            name: category.name,
            description: category.description,
            image: category.image,
            events_list,
            created_at: category.created_at,
        }
    }
}

/// Validated input for creating a category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub image: String,
}

impl NewCategory {
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        image: Option<String>,
    ) -> Result<Self> {
        let name = validate_category_name(name.as_deref())?.to_string();
        Ok(Self {
            name,
            description,
            image: image.unwrap_or_default(),
        })
    }
}

/// Check that a category name is present and strictly alphanumeric.
pub fn validate_category_name(name: Option<&str>) -> Result<&str> {
    match name {
        None | Some("") => Err(CatalogError::validation("name: Path `name` is required.")),
        Some(n) if n.chars().all(|c| c.is_ascii_alphanumeric()) => Ok(n),
        Some(_) => Err(CatalogError::validation(
            "name: Name must contain only alphanumeric characters.",
        )),
    }
}

/// Case-insensitive keyword match on name and description.
/// An empty keyword matches everything.
pub fn category_matches(category: &Category, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return true;
    }
    category.name.to_lowercase().contains(&keyword)
        || category
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&keyword))
            .unwrap_or(false)
}
