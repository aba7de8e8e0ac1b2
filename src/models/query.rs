use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{lenient_or_default, null_as_default};
use super::data_table::{CellValue, ColumnDef, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    #[default]
    Pending,
    Responded,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Pending => "pending",
            QueryStatus::Responded => "responded",
        }
    }
}

/// A visitor enquiry from the public contact form. Read-only here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub status: QueryStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Query {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "createdAt" => CellValue::timestamp(self.created_at),
            "name" => CellValue::text(self.name.as_str()),
            "email" => CellValue::text(self.email.as_str()),
            "subject" => CellValue::text(self.subject.as_str()),
            "status" => CellValue::text(self.status.as_str()),
            _ => CellValue::Empty,
        }
    }
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::created_at(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("subject", "Subject"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_either_field_and_status_defaults_to_pending() {
        let a: Query = serde_json::from_str(r#"{"id": "q1", "name": "Asha"}"#).unwrap();
        let b: Query = serde_json::from_str(r#"{"_id": "q2", "status": "responded"}"#).unwrap();
        assert_eq!(a.id, "q1");
        assert_eq!(a.status, QueryStatus::Pending);
        assert_eq!(b.id, "q2");
        assert_eq!(b.status, QueryStatus::Responded);
    }

    #[test]
    fn unknown_status_and_null_fields_decode() {
        let list: Vec<Query> = serde_json::from_str(
            r#"[{"_id": "q1", "status": "closed", "message": null}, {"_id": "q2", "status": "responded"}]"#,
        )
        .unwrap();
        assert_eq!(list[0].status, QueryStatus::Pending);
        assert_eq!(list[0].message, "");
        assert_eq!(list[1].status, QueryStatus::Responded);
    }
}
