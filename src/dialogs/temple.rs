use crate::auth::validate;
use crate::models::common::{StorageKey, join_list, split_list};
use crate::models::temple::Temple;

use super::{DialogForm, DialogMode, EntityDialog};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TempleDraft {
    pub title: String,
    /// Rich-text HTML.
    pub description: String,
    pub location: String,
    pub location_url: String,
    pub tags: String,
}

impl EntityDialog for TempleDraft {
    type Record = Temple;
    const NOUN: &'static str = "Temple";

    fn from_form(form: &DialogForm) -> Self {
        TempleDraft {
            title: form.text("title"),
            description: form.text("description"),
            location: form.text("location"),
            location_url: form.text("locationUrl"),
            tags: form.text("tags"),
        }
    }

    fn from_record(t: &Temple) -> Self {
        TempleDraft {
            title: t.title.clone(),
            description: t.description.clone(),
            location: t.location.clone(),
            location_url: t.location_url.clone(),
            tags: join_list(&t.tags),
        }
    }

    fn validate(&self, mode: DialogMode<'_, Temple>) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.title, "Title", 200));
        if mode.is_create() && self.description.trim().is_empty() {
            errors.push("Please enter temple description".to_string());
        }
        errors.extend(validate::validate_optional(&self.location, "Address", 500));
        errors.extend(validate::validate_url(&self.location_url, "Location Map URL", false));
        if split_list(&self.tags).is_empty() {
            errors.push("Tags is required".to_string());
        }
        errors
    }

    fn apply(self, t: &mut Temple, _mode: DialogMode<'_, Temple>) {
        t.title = self.title.trim().to_string();
        t.description = self.description;
        t.location = self.location.trim().to_string();
        t.location_url = self.location_url.trim().to_string();
        t.tags = split_list(&self.tags);
    }

    fn key_of(t: &Temple) -> Option<&StorageKey> {
        t.key.as_ref()
    }

    fn set_key(t: &mut Temple, key: Option<StorageKey>) {
        t.key = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_required_only_on_create() {
        let draft = TempleDraft { title: "Mansa Devi".into(), tags: "shakti".into(), ..Default::default() };
        assert_eq!(draft.validate(DialogMode::Create), vec!["Please enter temple description"]);
        let original = Temple { id: "t1".into(), ..Default::default() };
        assert!(draft.validate(DialogMode::Edit(&original)).is_empty());
    }
}
