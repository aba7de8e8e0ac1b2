use actix_web::HttpResponse;

use crate::dialogs::advertisement::AdvertisementDraft;
use crate::errors::{AppError, render};
use crate::handlers::crud::EntityPage;
use crate::models::advertisement::{self, Advertisement};
use crate::models::common::PublishStatus;
use crate::models::data_table::ColumnDef;
use crate::templates_structs::{AdvertisementFormTemplate, FormMeta, PageContext, SelectOption};

impl EntityPage for AdvertisementDraft {
    const BASE: &'static str = "/advertisements";
    const TITLE: &'static str = "Advertisements";
    const SUBTITLE: &'static str = "Manage advertisement banners";
    const ENTRY: &'static str = "advertisement";
    const DONE: [&'static str; 3] = ["Advertisement created", "Advertisement updated", "Advertisement entry deleted"];

    fn columns() -> Vec<ColumnDef> {
        advertisement::columns()
    }

    fn image_url(record: &Advertisement) -> Option<String> {
        record.image.clone()
    }

    fn render_form(ctx: PageContext, form: FormMeta, draft: Self) -> Result<HttpResponse, AppError> {
        let statuses = SelectOption::list(PublishStatus::ALL.iter().map(|s| s.as_str()), &draft.status);
        render(AdvertisementFormTemplate { ctx, form, draft, statuses })
    }
}
