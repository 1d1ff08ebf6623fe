// HTML form payloads
//
// Browsers submit every input, blank or not, so empty strings are read as
// "not supplied". Numeric event fields stay text until the handler converts
// them, so a bad number re-renders the form instead of failing extraction.

use eventboard_core::{CatalogError, EventDraft};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Treat a blank form field as None, otherwise parse it.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map(Some).map_err(de::Error::custom),
    }
}

/// Fields of the add-category form. Serialized back into the template when
/// the form is re-rendered with an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CategoryForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
}

/// Fields of the add-event form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub categories: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date_time: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub duration_in_minutes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub capacity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tickets_available: Option<String>,
}

impl TryFrom<EventForm> for EventDraft {
    type Error = CatalogError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        Ok(EventDraft {
            duration_in_minutes: parse_number("duration", form.duration_in_minutes.as_deref())?,
            capacity: parse_number("capacity", form.capacity.as_deref())?,
            tickets_available: parse_number("ticketsAvailable", form.tickets_available.as_deref())?,
            name: form.name,
            description: form.description,
            categories: form.categories,
            start_date_time: form.start_date_time,
            image: form.image,
        })
    }
}

fn parse_number(field: &str, value: Option<&str>) -> Result<Option<i32>, CatalogError> {
    value
        .map(|v| {
            v.parse().map_err(|_| {
                CatalogError::validation(format!(
                    "{field}: Cast to Number failed for value \"{v}\""
                ))
            })
        })
        .transpose()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryForm {
    #[serde(default)]
    pub category_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventForm {
    #[serde(default)]
    pub event_id: String,
}

/// `?keyword=` on the search pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_numbers_are_none() {
        let form: EventForm = serde_urlencoded::from_str(
            "name=Gig&categories=&startDateTime=2024-05-01T18%3A00&durationInMinutes=90&capacity=&ticketsAvailable=",
        )
        .unwrap();
        assert_eq!(form.name.as_deref(), Some("Gig"));
        assert_eq!(form.categories, None);

        let draft = EventDraft::try_from(form).unwrap();
        assert_eq!(draft.duration_in_minutes, Some(90));
        assert_eq!(draft.capacity, None);
        assert_eq!(draft.tickets_available, None);
    }

    #[test]
    fn test_non_numeric_capacity_is_a_validation_error() {
        let form: EventForm = serde_urlencoded::from_str("name=Gig&capacity=lots").unwrap();
        assert_eq!(form.capacity.as_deref(), Some("lots"));

        let err = EventDraft::try_from(form).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref msg) if msg.starts_with("capacity:")));
    }

    #[test]
    fn test_missing_fields_default() {
        let form: CategoryForm = serde_urlencoded::from_str("name=Music").unwrap();
        assert_eq!(form.name.as_deref(), Some("Music"));
        assert_eq!(form.image, None);
    }
}
