use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{PublishStatus, StorageKey, flexible_date, lenient_or_default, null_as_default, number_or_string};
use super::data_table::{CellValue, ColumnDef, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Click-through target.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "flexible_date", skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
    /// Display duration in seconds.
    #[serde(default, deserialize_with = "number_or_string")]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<StorageKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Advertisement {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "createdAt" => CellValue::timestamp(self.created_at),
            "title" => CellValue::text(self.title.as_str()),
            "status" => CellValue::text(self.status.as_str()),
            "duration" => CellValue::Number(self.duration as i64),
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
