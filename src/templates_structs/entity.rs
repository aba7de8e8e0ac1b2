use askama::Template;

use crate::dialogs::advertisement::AdvertisementDraft;
use crate::dialogs::hotel::HotelDraft;
use crate::dialogs::news::NewsDraft;
use crate::dialogs::temple::TempleDraft;
use crate::models::data_table::TableView;

use super::PageContext;

/// Table page shared by every collection.
#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub subtitle: String,
    /// None on read-only pages.
    pub add: Option<AddButton>,
    pub table: TableView,
}

pub struct AddButton {
    pub url: String,
    pub label: String,
}

/// Dialog chrome shared by the entity forms.
pub struct FormMeta {
    pub title: String,
    pub description: String,
    pub action: String,
    pub submit_label: String,
    pub cancel_url: String,
    pub errors: Vec<String>,
    /// Current image of the record being edited.
    pub image_url: Option<String>,
    pub image_required: bool,
}

#[derive(Template)]
#[template(path = "forms/hotel.html")]
pub struct HotelFormTemplate {
    pub ctx: PageContext,
    pub form: FormMeta,
    pub draft: HotelDraft,
}

#[derive(Template)]
#[template(path = "forms/temple.html")]
pub struct TempleFormTemplate {
    pub ctx: PageContext,
    pub form: FormMeta,
    pub draft: TempleDraft,
}

pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list<'a>(values: impl IntoIterator<Item = &'a str>, current: &str) -> Vec<SelectOption> {
        values
            .into_iter()
            .map(|v| SelectOption { value: v.to_string(), selected: v == current })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "forms/news.html")]
pub struct NewsFormTemplate {
    pub ctx: PageContext,
    pub form: FormMeta,
    pub draft: NewsDraft,
    pub categories: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "forms/advertisement.html")]
pub struct AdvertisementFormTemplate {
    pub ctx: PageContext,
    pub form: FormMeta,
    pub draft: AdvertisementDraft,
    pub statuses: Vec<SelectOption>,
}
