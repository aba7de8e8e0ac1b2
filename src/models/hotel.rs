use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{StorageKey, null_as_default, number_or_string};
use super::data_table::{CellValue, ColumnDef, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A hotel listing. `email`/`password` are the owner's login for the
/// hotel-scoped console; the API stores and returns them as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "number_or_string")]
    pub rooms_available: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    pub likes: u32,
    /// Public URL of the current image, computed by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<StorageKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Hotel {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "createdAt" => CellValue::timestamp(self.created_at),
            "title" => CellValue::text(self.title.as_str()),
            "roomsAvailable" => CellValue::Number(self.rooms_available as i64),
            "likes" => CellValue::Number(self.likes as i64),
            _ => CellValue::Empty,
        }
    }
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::created_at(),
        ColumnDef::new("title", "Title").sortable(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_shape() {
        let json = r#"{
            "_id": "h1", "email": "desk@ganga.in", "password": "pw",
            "title": "Ganga View", "description": "", "address": "Rishikesh Road",
            "locationUrl": "https://maps.example/g", "amenities": ["Wifi", "Parking"],
            "contact": {"phone": "99999", "email": "desk@ganga.in"},
            "roomsAvailable": 12, "likes": 4, "image": "https://cdn/x.jpg",
            "key": "uploads/x.jpg", "createdAt": "2026-01-02T03:04:05.000Z"
        }"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.id, "h1");
        assert_eq!(hotel.amenities, vec!["Wifi", "Parking"]);
        assert_eq!(hotel.contact.website, None);
        assert_eq!(hotel.key, Some(StorageKey("uploads/x.jpg".into())));
        assert!(hotel.created_at.is_some());
    }

    #[test]
    fn new_record_serializes_without_id() {
        let hotel = Hotel { title: "Ganga View".into(), ..Default::default() };
        let value = serde_json::to_value(&hotel).unwrap();
        assert!(value.get("_id").is_none());
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["roomsAvailable"], 0);
    }
}
