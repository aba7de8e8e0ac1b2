use actix_web::HttpResponse;

use crate::api::{ApiClient, ApiError, RequestScope};
use crate::dialogs::news::NewsDraft;
use crate::errors::{AppError, render};
use crate::handlers::crud::EntityPage;
use crate::models::common::PublishStatus;
use crate::models::data_table::{ColumnDef, DataTable, Paging, RowActions, TableQuery, TableView};
use crate::models::news::{self, News, NewsCategory};
use crate::templates_structs::{FormMeta, NewsFormTemplate, PageContext, SelectOption};

impl EntityPage for NewsDraft {
    const BASE: &'static str = "/news";
    const TITLE: &'static str = "News";
    const SUBTITLE: &'static str = "Manage tourism news and updates";
    const ENTRY: &'static str = "news";
    const DONE: [&'static str; 3] = ["News created", "News updated", "News deleted"];

    fn columns() -> Vec<ColumnDef> {
        news::columns()
    }

    fn image_url(record: &News) -> Option<String> {
        record.image.clone()
    }

    fn render_form(ctx: PageContext, form: FormMeta, draft: Self) -> Result<HttpResponse, AppError> {
        let categories = SelectOption::list(NewsCategory::ALL.iter().map(|c| c.label()), &draft.category);
        let statuses = SelectOption::list(PublishStatus::ALL.iter().map(|s| s.as_str()), &draft.status);
        render(NewsFormTemplate { ctx, form, draft, categories, statuses })
    }

    /// The API pages news; the table renders the one page it returns. A page
    /// past the end falls back to the last one.
    async fn load_table(
        api: &ApiClient,
        token: Option<&str>,
        scope: &RequestScope,
        query: &TableQuery,
    ) -> Result<TableView, ApiError> {
        let (mut page, limit) = (query.page(), query.limit());
        let mut resp = api.fetch_news_page(page, limit, token, scope.token()).await?;
        if resp.total_pages > 0 && page > resp.total_pages {
            page = resp.total_pages;
            resp = api.fetch_news_page(page, limit, token, scope.token()).await?;
        }
        Ok(DataTable::new(Self::BASE, Self::columns(), RowActions::edit_and_delete(Self::BASE))
            .sort(query.sort_spec())
            .paging(Paging::Server { page, limit, total_pages: resp.total_pages })
            .render(resp.news))
    }
}
