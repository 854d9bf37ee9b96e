//! Core data types for the landing page content.
//!
//! Both lists are produced by the admin surface and only ever read here.
//! Neither type carries an identity: list order is display order and
//! duplicates are rendered independently.

use serde::{Deserialize, Deserializer, Serialize};

/// A single gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Opaque reference to the image resource (URL or data URI)
    pub url: String,
    /// Caption; empty when the writer left it out
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl GalleryImage {
    /// Create a new gallery image with a caption.
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }

    /// Create a gallery image without a caption.
    pub fn without_description(url: impl Into<String>) -> Self {
        Self::new(url, "")
    }
}

/// A community event as written by the admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    /// Free text, expected as `"<Month> <Day>"`
    pub date: String,
    /// Free text, e.g. "3:00 PM"
    pub time: String,
    pub location: String,
}

impl Event {
    /// Create a new event.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: date.into(),
            time: time.into(),
            location: location.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_image_missing_description() {
        let image: GalleryImage = serde_json::from_str(r#"{"url":"a.png"}"#).unwrap();
        assert_eq!(image.url, "a.png");
        assert_eq!(image.description, "");
    }

    #[test]
    fn test_gallery_image_null_description() {
        let image: GalleryImage =
            serde_json::from_str(r#"{"url":"a.png","description":null}"#).unwrap();
        assert_eq!(image.description, "");
    }

    #[test]
    fn test_gallery_image_requires_url() {
        let result = serde_json::from_str::<GalleryImage>(r#"{"description":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_event_ignores_unknown_fields() {
        let json = r#"{
            "title": "Cleanup",
            "description": "Bring gloves",
            "date": "March 5",
            "time": "3:00 PM",
            "location": "Park",
            "id": 1712345678
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            Event::new("Cleanup", "Bring gloves", "March 5", "3:00 PM", "Park")
        );
    }

    #[test]
    fn test_event_requires_all_fields() {
        let json = r#"{"title":"Cleanup","description":"x","date":"March 5","time":"3 PM"}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_event_json_field_names() {
        let event = Event::new("t", "d", "March 5", "3 PM", "Hall");
        let value = serde_json::to_value(&event).unwrap();
        for field in ["title", "description", "date", "time", "location"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }
}
