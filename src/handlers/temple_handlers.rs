use actix_web::HttpResponse;

use crate::dialogs::temple::TempleDraft;
use crate::errors::{AppError, render};
use crate::handlers::crud::EntityPage;
use crate::models::data_table::ColumnDef;
use crate::models::temple::{self, Temple};
use crate::templates_structs::{FormMeta, PageContext, TempleFormTemplate};

impl EntityPage for TempleDraft {
    const BASE: &'static str = "/temples";
    const TITLE: &'static str = "Temples";
    const SUBTITLE: &'static str = "Manage temple pages";
    const ENTRY: &'static str = "temple";
    const DONE: [&'static str; 3] = ["Temple page created", "Temple page updated", "Temple entry deleted"];

    fn columns() -> Vec<ColumnDef> {
        temple::columns()
    }

    fn image_url(record: &Temple) -> Option<String> {
        record.image.clone()
    }

    fn render_form(ctx: PageContext, form: FormMeta, draft: Self) -> Result<HttpResponse, AppError> {
        render(TempleFormTemplate { ctx, form, draft })
    }
}
