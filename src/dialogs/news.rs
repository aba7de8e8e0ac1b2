use chrono::Utc;

use crate::auth::validate;
use crate::models::common::{PublishStatus, StorageKey, join_list, split_list};
use crate::models::news::{News, NewsCategory, slugify};

use super::{DialogForm, DialogMode, EntityDialog};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsDraft {
    pub author: String,
    pub title: String,
    /// Normalized on read, so a re-rendered dialog shows the slug as stored.
    pub url_title: String,
    /// Rich-text HTML.
    pub content: String,
    pub category: String,
    pub status: String,
    pub tags: String,
    pub is_breaking_news: bool,
}

impl EntityDialog for NewsDraft {
    type Record = News;
    const NOUN: &'static str = "News";

    fn from_form(form: &DialogForm) -> Self {
        NewsDraft {
            author: form.text("author"),
            title: form.text("title"),
            url_title: slugify(&form.text("urlTitle")),
            content: form.text("content"),
            category: form.text("category"),
            status: form.text("status"),
            tags: form.text("tags"),
            is_breaking_news: form.flag("isBreakingNews"),
        }
    }

    fn from_record(n: &News) -> Self {
        NewsDraft {
            author: n.author.clone(),
            title: n.title.clone(),
            url_title: n.url_title.clone(),
            content: n.content.clone(),
            category: n.category.map(|c| c.label().to_string()).unwrap_or_default(),
            status: n.status.as_str().to_string(),
            tags: join_list(&n.tags),
            is_breaking_news: n.is_breaking_news,
        }
    }

    fn validate(&self, mode: DialogMode<'_, News>) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.author, "Author", 100));
        errors.extend(validate::validate_required(&self.title, "Title", 300));
        errors.extend(validate::validate_required(&self.url_title, "English Title for URL", 300));
        if mode.is_create() && self.content.trim().is_empty() {
            errors.push("Please enter news content".to_string());
        }
        if NewsCategory::parse(&self.category).is_none() {
            errors.push("Please select a category".to_string());
        }
        if !self.status.trim().is_empty() && PublishStatus::parse(&self.status).is_none() {
            errors.push("Status must be Published or Archived".to_string());
        }
        if split_list(&self.tags).is_empty() {
            errors.push("Tags is required".to_string());
        }
        errors
    }

    fn apply(self, n: &mut News, mode: DialogMode<'_, News>) {
        n.author = self.author.trim().to_string();
        n.title = self.title.trim().to_string();
        n.url_title = slugify(&self.url_title);
        n.content = self.content;
        n.category = NewsCategory::parse(&self.category);
        n.status = PublishStatus::parse(&self.status).unwrap_or_default();
        n.tags = split_list(&self.tags);
        n.is_breaking_news = self.is_breaking_news;
        if mode.is_create() {
            n.date = Some(Utc::now());
        }
    }

    fn key_of(n: &News) -> Option<&StorageKey> {
        n.key.as_ref()
    }

    fn set_key(n: &mut News, key: Option<StorageKey>) {
        n.key = key;
    }
}
