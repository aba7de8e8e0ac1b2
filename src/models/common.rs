use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::de::{DeserializeOwned, IgnoredAny, IntoDeserializer, value::StrDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of an uploaded asset, returned by the presigned-upload
/// endpoint and stored on the entity as `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(pub String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication state shared by news and advertisements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PublishStatus {
    #[default]
    Published,
    Archived,
}

impl PublishStatus {
    pub const ALL: [PublishStatus; 2] = [PublishStatus::Published, PublishStatus::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Published => "Published",
            PublishStatus::Archived => "Archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s.trim())
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Indian Standard Time (UTC+05:30, no DST).
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// `19/10/2026, 3:04:05 pm` in IST.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&ist()).format("%d/%m/%Y, %-I:%M:%S %P").to_string()
}

/// `19/10/2026` in IST.
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&ist()).format("%d/%m/%Y").to_string()
}

/// Split a comma-separated input into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Accepts `12`, `"12"`, or null; the API is inconsistent about numeric fields.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Float(f64),
        Text(String),
    }
    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Ok(n.min(u32::MAX as u64) as u32),
        Some(Raw::Float(f)) if f >= 0.0 => Ok(f as u32),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(Raw::Text(s)) => s.trim().parse::<u32>().map_err(serde::de::Error::custom),
        _ => Ok(0),
    }
}

/// Reads `null` as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a closed-set string value. Anything outside the set, a non-string,
/// or null comes back as `None` so one odd record cannot fail a whole list.
pub fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Other(IgnoredAny),
    }
    match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => {
            let de: StrDeserializer<'_, serde::de::value::Error> = s.as_str().into_deserializer();
            let parsed = T::deserialize(de).ok();
            if parsed.is_none() {
                log::warn!("Ignoring unrecognised value '{s}' from the content API");
            }
            Ok(parsed)
        }
        Some(Loose::Other(_)) | None => Ok(None),
    }
}

/// Like [`lenient_option`], falling back to the default.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_option(deserializer)?.unwrap_or_default())
}

/// Accepts a bare `YYYY-MM-DD` or a full RFC 3339 timestamp and keeps the date.
pub fn flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let parsed = parse_date(s);
            if parsed.is_none() {
                log::warn!("Ignoring unparsable date '{s}' from the content API");
            }
            Ok(parsed)
        }
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc).date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_renders_in_ist() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 9, 34, 5).unwrap();
        assert_eq!(format_timestamp(&ts), "19/10/2026, 3:04:05 pm");
        assert_eq!(format_date(&ts), "19/10/2026");
    }

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(split_list(" Wifi,Parking , ,Pool"), vec!["Wifi", "Parking", "Pool"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn publish_status_parse() {
        assert_eq!(PublishStatus::parse("Archived"), Some(PublishStatus::Archived));
        assert_eq!(PublishStatus::parse("draft"), None);
    }

    #[derive(Deserialize)]
    struct Numeric {
        #[serde(deserialize_with = "number_or_string", default)]
        n: u32,
    }

    #[test]
    fn numbers_may_arrive_as_strings() {
        let a: Numeric = serde_json::from_str(r#"{"n": 4}"#).unwrap();
        let b: Numeric = serde_json::from_str(r#"{"n": "4"}"#).unwrap();
        let c: Numeric = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!((a.n, b.n, c.n), (4, 4, 0));
    }

    #[derive(Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "lenient_or_default")]
        status: PublishStatus,
        #[serde(default, deserialize_with = "lenient_option")]
        fallback: Option<PublishStatus>,
        #[serde(default, deserialize_with = "null_as_default")]
        note: String,
    }

    #[test]
    fn unknown_values_fall_back_instead_of_failing() {
        let odd: Loose = serde_json::from_str(r#"{"status": "Draft", "fallback": 3, "note": null}"#).unwrap();
        assert_eq!(odd.status, PublishStatus::Published);
        assert_eq!(odd.fallback, None);
        assert_eq!(odd.note, "");

        let known: Loose = serde_json::from_str(r#"{"status": "Archived", "fallback": "Archived", "note": "x"}"#).unwrap();
        assert_eq!(known.status, PublishStatus::Archived);
        assert_eq!(known.fallback, Some(PublishStatus::Archived));
        assert_eq!(known.note, "x");
    }

    #[test]
    fn dates_accept_plain_and_rfc3339() {
        assert_eq!(parse_date("2026-12-31"), NaiveDate::from_ymd_opt(2026, 12, 31));
        assert_eq!(parse_date("2026-12-31T00:00:00.000Z"), NaiveDate::from_ymd_opt(2026, 12, 31));
        assert_eq!(parse_date("31/12/2026"), None);
    }
}
