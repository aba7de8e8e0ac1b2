use actix_web::HttpResponse;

use crate::dialogs::hotel::HotelDraft;
use crate::errors::{AppError, render};
use crate::handlers::crud::EntityPage;
use crate::models::data_table::ColumnDef;
use crate::models::hotel::{self, Hotel};
use crate::templates_structs::{FormMeta, HotelFormTemplate, PageContext};

impl EntityPage for HotelDraft {
    const BASE: &'static str = "/hotels";
    const TITLE: &'static str = "Hotels";
    const SUBTITLE: &'static str = "Manage hotels and bookings";
    const ENTRY: &'static str = "hotel";
    const DONE: [&'static str; 3] = ["Hotel created", "Hotel updated", "Hotel entry deleted"];

    fn columns() -> Vec<ColumnDef> {
        hotel::columns()
    }

    fn image_url(record: &Hotel) -> Option<String> {
        record.image.clone()
    }

    fn render_form(ctx: PageContext, form: FormMeta, draft: Self) -> Result<HttpResponse, AppError> {
        render(HotelFormTemplate { ctx, form, draft })
    }
}
