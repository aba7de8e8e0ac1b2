use crate::auth::validate;
use crate::models::advertisement::Advertisement;
use crate::models::common::{PublishStatus, StorageKey, parse_date};

use super::{DialogForm, DialogMode, EntityDialog};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertisementDraft {
    pub title: String,
    pub url: String,
    pub status: String,
    /// `YYYY-MM-DD`, as a date input submits it.
    pub expiry: String,
    pub duration: String,
}

impl EntityDialog for AdvertisementDraft {
    type Record = Advertisement;
    const NOUN: &'static str = "Advertisement";

    fn from_form(form: &DialogForm) -> Self {
        AdvertisementDraft {
            title: form.text("title"),
            url: form.text("url"),
            status: form.text("status"),
            expiry: form.text("expiry"),
            duration: form.text("duration"),
        }
    }

    fn from_record(a: &Advertisement) -> Self {
        AdvertisementDraft {
            title: a.title.clone(),
            url: a.url.clone(),
            status: a.status.as_str().to_string(),
            expiry: a.expiry.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            duration: a.duration.to_string(),
        }
    }

    fn validate(&self, _mode: DialogMode<'_, Advertisement>) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.title, "Title", 200));
        errors.extend(validate::validate_url(&self.url, "Advertisement URL", false));
        if !self.status.trim().is_empty() && PublishStatus::parse(&self.status).is_none() {
            errors.push("Status must be Published or Archived".to_string());
        }
        errors.extend(validate::validate_date(&self.expiry, "Expiry Date"));
        if self.duration.trim().is_empty() {
            errors.push("Duration is required".to_string());
        } else {
            errors.extend(validate::parse_count(&self.duration, "Duration").err());
        }
        errors
    }

    fn apply(self, a: &mut Advertisement, _mode: DialogMode<'_, Advertisement>) {
        a.title = self.title.trim().to_string();
        a.url = self.url.trim().to_string();
        a.status = PublishStatus::parse(&self.status).unwrap_or_default();
        a.expiry = parse_date(self.expiry.trim());
        a.duration = validate::parse_count(&self.duration, "Duration").unwrap_or_default();
    }

    fn key_of(a: &Advertisement) -> Option<&StorageKey> {
        a.key.as_ref()
    }

    fn set_key(a: &mut Advertisement, key: Option<StorageKey>) {
        a.key = key;
    }
}
