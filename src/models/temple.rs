use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{StorageKey, null_as_default};
use super::data_table::{CellValue, ColumnDef, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temple {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Older records carry the name as `name`.
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub title: String,
    /// Rich-text HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<StorageKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Temple {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "createdAt" => CellValue::timestamp(self.created_at),
            "title" => CellValue::text(self.title.as_str()),
            "location" => CellValue::text(self.location.as_str()),
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
    fn legacy_name_field_maps_to_title() {
        let temple: Temple = serde_json::from_str(r#"{"_id": "t1", "name": "Mansa Devi"}"#).unwrap();
        assert_eq!(temple.title, "Mansa Devi");
        let value = serde_json::to_value(&temple).unwrap();
        assert_eq!(value["title"], "Mansa Devi");
        assert!(value.get("name").is_none());
    }
}
