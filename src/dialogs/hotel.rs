use crate::auth::validate;
use crate::models::common::{StorageKey, join_list, split_list};
use crate::models::hotel::{Contact, Hotel};

use super::{DialogForm, DialogMode, EntityDialog};

/// Hotel dialog state. Also backs the hotel owner's "Update Hotel Data".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelDraft {
    pub email: String,
    pub password: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location_url: String,
    /// Comma-separated.
    pub amenities: String,
    pub phone: String,
    pub contact_email: String,
    pub website: String,
    pub likes: String,
    pub rooms_available: String,
}

impl EntityDialog for HotelDraft {
    type Record = Hotel;
    const NOUN: &'static str = "Hotel";

    fn from_form(form: &DialogForm) -> Self {
        HotelDraft {
            email: form.text("email"),
            password: form.text("password"),
            title: form.text("title"),
            description: form.text("description"),
            address: form.text("address"),
            location_url: form.text("locationUrl"),
            amenities: form.text("amenities"),
            phone: form.text("phone"),
            contact_email: form.text("contactEmail"),
            website: form.text("website"),
            likes: form.text("likes"),
            rooms_available: form.text("roomsAvailable"),
        }
    }

    fn from_record(h: &Hotel) -> Self {
        HotelDraft {
            email: h.email.clone(),
            password: h.password.clone(),
            title: h.title.clone(),
            description: h.description.clone(),
            address: h.address.clone(),
            location_url: h.location_url.clone(),
            amenities: join_list(&h.amenities),
            phone: h.contact.phone.clone(),
            contact_email: h.contact.email.clone(),
            website: h.contact.website.clone().unwrap_or_default(),
            likes: h.likes.to_string(),
            rooms_available: h.rooms_available.to_string(),
        }
    }

    fn validate(&self, _mode: DialogMode<'_, Hotel>) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_email(&self.email, "Email"));
        errors.extend(validate::validate_required(&self.password, "Password", 128));
        errors.extend(validate::validate_required(&self.title, "Title", 200));
        errors.extend(validate::validate_optional(&self.address, "Address", 500));
        errors.extend(validate::validate_url(&self.location_url, "Location Map URL", false));
        if split_list(&self.amenities).is_empty() {
            errors.push("Amenities is required".to_string());
        }
        if !self.contact_email.trim().is_empty() {
            errors.extend(validate::validate_email(&self.contact_email, "Contact email"));
        }
        errors.extend(validate::validate_url(&self.website, "Website", false));
        errors.extend(validate::parse_count(&self.likes, "Likes").err());
        errors.extend(validate::parse_count(&self.rooms_available, "Rooms Available").err());
        errors
    }

    fn apply(self, h: &mut Hotel, _mode: DialogMode<'_, Hotel>) {
        h.email = self.email.trim().to_string();
        h.password = self.password;
        h.title = self.title.trim().to_string();
        h.description = self.description;
        h.address = self.address.trim().to_string();
        h.location_url = self.location_url.trim().to_string();
        h.amenities = split_list(&self.amenities);
        let website = self.website.trim();
        h.contact = Contact {
            phone: self.phone.trim().to_string(),
            email: self.contact_email.trim().to_string(),
            website: (!website.is_empty()).then(|| website.to_string()),
        };
        h.likes = validate::parse_count(&self.likes, "Likes").unwrap_or_default();
        h.rooms_available = validate::parse_count(&self.rooms_available, "Rooms Available").unwrap_or_default();
    }

    fn key_of(h: &Hotel) -> Option<&StorageKey> {
        h.key.as_ref()
    }

    fn set_key(h: &mut Hotel, key: Option<StorageKey>) {
        h.key = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::assemble;

    fn filled() -> HotelDraft {
        HotelDraft {
            email: "desk@ganga.in".into(),
            password: "secret".into(),
            title: "Ganga View".into(),
            amenities: "Wifi, Parking".into(),
            likes: "3".into(),
            rooms_available: "12".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(filled().validate(DialogMode::Create).is_empty());
    }

    #[test]
    fn bad_numbers_and_missing_fields_are_reported() {
        let draft = HotelDraft { likes: "-2".into(), title: " ".into(), amenities: String::new(), ..filled() };
        let errors = draft.validate(DialogMode::Create);
        assert!(errors.iter().any(|e| e.starts_with("Title")));
        assert!(errors.iter().any(|e| e.starts_with("Amenities")));
        assert!(errors.iter().any(|e| e.starts_with("Likes")));
    }

    #[test]
    fn edit_keeps_identity_and_unshown_fields() {
        let original = Hotel {
            id: "h1".into(),
            image: Some("https://cdn/old.jpg".into()),
            key: Some(StorageKey("uploads/old.jpg".into())),
            ..Default::default()
        };
        let record = assemble(filled(), DialogMode::Edit(&original), None);
        assert_eq!(record.id, "h1");
        assert_eq!(record.key, original.key);
        assert_eq!(record.image, original.image);
        assert_eq!(record.amenities, vec!["Wifi", "Parking"]);
        assert_eq!(record.rooms_available, 12);
        assert_eq!(record.contact.website, None);
    }

    #[test]
    fn draft_round_trips_through_record() {
        let record = assemble(filled(), DialogMode::Create, Some(StorageKey("k".into())));
        let again = HotelDraft::from_record(&record);
        assert_eq!(again.amenities, "Wifi, Parking");
        assert_eq!(again.rooms_available, "12");
        assert_eq!(record.key, Some(StorageKey("k".into())));
    }
}
