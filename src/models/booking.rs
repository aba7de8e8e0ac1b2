use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{lenient_or_default, null_as_default, number_or_string};
use super::data_table::{CellFormat, CellValue, ColumnDef, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HotelSummary {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// `hotelId` is populated with the hotel document on the admin listing and
/// left as a bare id on the hotel-scoped one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HotelRef {
    Embedded(HotelSummary),
    Id(String),
}

impl HotelRef {
    pub fn id(&self) -> &str {
        match self {
            HotelRef::Embedded(h) => &h.id,
            HotelRef::Id(id) => id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            HotelRef::Embedded(h) if !h.title.is_empty() => Some(&h.title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    /// Check-in date exactly as the visitor entered it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub total_days: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub status: BookingStatus,
    #[serde(default)]
    pub hotel_id: Option<HotelRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn hotel_title(&self) -> &str {
        self.hotel_id.as_ref().and_then(HotelRef::title).unwrap_or("")
    }

    /// Whether this booking was made against the given hotel.
    pub fn belongs_to(&self, hotel_id: &str) -> bool {
        self.hotel_id.as_ref().is_some_and(|h| h.id() == hotel_id)
    }
}

/// Body of `PUT /bookings/{id}/status`.
#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

impl TableRow for Booking {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "createdAt" => CellValue::timestamp(self.created_at),
            "name" => CellValue::text(self.name.as_str()),
            "phone" => CellValue::text(self.phone.as_str()),
            "date" => CellValue::text(self.date.as_str()),
            "totalDays" => CellValue::Number(self.total_days as i64),
            "status" => CellValue::text(self.status.as_str()),
            "hotel" => CellValue::text(self.hotel_title()),
            _ => CellValue::Empty,
        }
    }
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::created_at(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("phone", "Phone"),
        ColumnDef::new("date", "Check-in"),
        ColumnDef::new("totalDays", "Total Stay").format(CellFormat::Suffix("days")),
        ColumnDef::new("status", "Status").format(CellFormat::Badge),
        ColumnDef::new("hotel", "Hotel"),
    ]
}

/// The hotel-scoped page already names the hotel in its heading.
pub fn hotel_columns() -> Vec<ColumnDef> {
    columns().into_iter().filter(|c| c.key != "hotel").collect()
}
