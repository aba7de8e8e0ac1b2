use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::api::RequestScope;
use crate::auth::session::AuthState;
use crate::errors::{AppError, render};
use crate::models::common::format_timestamp;
use crate::models::data_table::{DataTable, RowActions, TableQuery};
use crate::models::query::{self, Query};
use crate::templates_structs::{ListTemplate, PageContext, QueryDetailTemplate};

const BASE: &str = "/queries";

pub async fn list(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    params: web::Query<TableQuery>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let rows: Vec<Query> = state.api.fetch_all(auth.token(), scope.token()).await?;
    let table = DataTable::new(BASE, query::columns(), RowActions::detail(BASE, false))
        .sort(params.sort_spec())
        .paging(params.client_paging())
        .render(rows);
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, BASE);
    render(ListTemplate {
        ctx,
        title: "Queries".to_string(),
        subtitle: "Manage tourist queries and support tickets".to_string(),
        add: None,
        table,
    })
}

/// Read-only view of one query.
pub async fn detail(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let rows: Vec<Query> = state.api.fetch_all(auth.token(), scope.token()).await?;
    let query = rows
        .into_iter()
        .find(|q| q.id == path.as_str())
        .ok_or(AppError::NotFound)?;
    let created_at = query.created_at.as_ref().map(format_timestamp).unwrap_or_default();
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, BASE);
    render(QueryDetailTemplate { ctx, query, created_at, back_url: BASE.to_string() })
}
