use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::common::{PublishStatus, StorageKey, lenient_option, lenient_or_default, null_as_default, number_or_string};
use super::data_table::{CellValue, ColumnDef, TableRow};

/// Closed set of news categories the portal publishes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsCategory {
    #[serde(rename = "Local News")]
    LocalNews,
    Events,
    #[serde(rename = "Business & Economy")]
    BusinessEconomy,
    #[serde(rename = "Health & Wellness")]
    HealthWellness,
    Education,
    Sports,
    Entertainment,
    Weather,
    Lifestyle,
    Technology,
    Transportation,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Tourism,
    #[serde(rename = "Crime & Safety")]
    CrimeSafety,
    Environment,
    Politics,
    #[serde(rename = "Human Interest")]
    HumanInterest,
    Opinion,
    #[serde(rename = "Business Directory")]
    BusinessDirectory,
    Community,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 20] = [
        NewsCategory::LocalNews,
        NewsCategory::Events,
        NewsCategory::BusinessEconomy,
        NewsCategory::HealthWellness,
        NewsCategory::Education,
        NewsCategory::Sports,
        NewsCategory::Entertainment,
        NewsCategory::Weather,
        NewsCategory::Lifestyle,
        NewsCategory::Technology,
        NewsCategory::Transportation,
        NewsCategory::RealEstate,
        NewsCategory::Tourism,
        NewsCategory::CrimeSafety,
        NewsCategory::Environment,
        NewsCategory::Politics,
        NewsCategory::HumanInterest,
        NewsCategory::Opinion,
        NewsCategory::BusinessDirectory,
        NewsCategory::Community,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::LocalNews => "Local News",
            NewsCategory::Events => "Events",
            NewsCategory::BusinessEconomy => "Business & Economy",
            NewsCategory::HealthWellness => "Health & Wellness",
            NewsCategory::Education => "Education",
            NewsCategory::Sports => "Sports",
            NewsCategory::Entertainment => "Entertainment",
            NewsCategory::Weather => "Weather",
            NewsCategory::Lifestyle => "Lifestyle",
            NewsCategory::Technology => "Technology",
            NewsCategory::Transportation => "Transportation",
            NewsCategory::RealEstate => "Real Estate",
            NewsCategory::Tourism => "Tourism",
            NewsCategory::CrimeSafety => "Crime & Safety",
            NewsCategory::Environment => "Environment",
            NewsCategory::Politics => "Politics",
            NewsCategory::HumanInterest => "Human Interest",
            NewsCategory::Opinion => "Opinion",
            NewsCategory::BusinessDirectory => "Business Directory",
            NewsCategory::Community => "Community",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s.trim())
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// URL-safe English slug used in public article links.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_title: String,
    /// Rich-text HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub category: Option<NewsCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_breaking_news: bool,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "number_or_string")]
    pub clicks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<StorageKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of `GET /news?page&limit`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: Vec<News>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub total_pages: u32,
}

impl TableRow for News {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "createdAt" => CellValue::timestamp(self.created_at),
            "title" => CellValue::text(self.title.as_str()),
            "category" => CellValue::text(self.category.map(|c| c.label()).unwrap_or("")),
            "status" => CellValue::text(self.status.as_str()),
            "clicks" => CellValue::Number(self.clicks as i64),
            "isBreakingNews" => CellValue::Flag(self.is_breaking_news),
            _ => CellValue::Empty,
        }
    }
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::created_at(),
        ColumnDef::new("title", "Title").sortable(),
        ColumnDef::new("category", "Category").sortable(),
        ColumnDef::new("status", "Status").sortable(),
    ]
}

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize an English title into the URL slug the public site expects:
/// trimmed, lowercased, whitespace runs as `-`, and `.-` collapsed to `-`.
pub fn slugify(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, "-").replace(".-", "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_categories_round_trip_through_labels() {
        assert_eq!(NewsCategory::ALL.len(), 20);
        for c in NewsCategory::ALL {
            assert_eq!(NewsCategory::parse(c.label()), Some(c));
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.label()));
        }
    }

    #[test]
    fn slugify_matches_public_url_rules() {
        assert_eq!(slugify("  Ganga Aarti   Timings "), "ganga-aarti-timings");
        assert_eq!(slugify("Kumbh Mela 2027. New Dates"), "kumbh-mela-2027-new-dates");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn page_total_accepts_string() {
        let page: NewsPage = serde_json::from_str(r#"{"news": [], "totalPages": "4"}"#).unwrap();
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn decodes_article() {
        let json = r#"{"_id": "n1", "title": "Aarti", "category": "Local News",
            "status": "Archived", "isBreakingNews": true, "clicks": 10, "tags": ["ganga"]}"#;
        let news: News = serde_json::from_str(json).unwrap();
        assert_eq!(news.category, Some(NewsCategory::LocalNews));
        assert_eq!(news.status, PublishStatus::Archived);
        assert!(news.is_breaking_news);
        assert_eq!(news.cell("category"), CellValue::text("Local News"));
    }

    #[test]
    fn unknown_category_keeps_the_rest_of_the_page() {
        let json = r#"{"news": [
            {"_id": "n1", "title": "Aarti", "category": "Local News"},
            {"_id": "n2", "title": "Satsang", "category": "Spirituality", "status": "Pending", "author": null}
        ], "totalPages": 1}"#;
        let page: NewsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.news.len(), 2);
        assert_eq!(page.news[0].category, Some(NewsCategory::LocalNews));
        assert_eq!(page.news[1].category, None);
        assert_eq!(page.news[1].status, PublishStatus::Published);
        assert_eq!(page.news[1].author, "");
    }
}
