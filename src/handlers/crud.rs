//! List, create, edit and delete for the dialog-backed collections
//! (hotels, temples, news, advertisements). Each page is one
//! [`EntityPage`] impl; the handlers are generic over it and registered per
//! page in `routes`.

use actix_multipart::Multipart;
use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::api::{ApiClient, ApiError, RequestScope};
use crate::auth::csrf;
use crate::auth::session::{AuthState, Flash, set_flash};
use crate::dialogs::{self, DialogForm, DialogMode, EntityDialog, Submission};
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, see_other};
use crate::models::data_table::{ColumnDef, DataTable, RowActions, TableQuery, TableRow, TableView};
use crate::templates_structs::{AddButton, FormMeta, ListTemplate, PageContext};

pub trait EntityPage: EntityDialog {
    const BASE: &'static str;
    const TITLE: &'static str;
    const SUBTITLE: &'static str;
    /// Lower-case noun used in toast details: "The hotel entry has been ...".
    const ENTRY: &'static str;
    /// Toast titles for create, update, delete.
    const DONE: [&'static str; 3];

    fn columns() -> Vec<ColumnDef>;

    fn image_url(record: &Self::Record) -> Option<String>;

    fn render_form(ctx: PageContext, form: FormMeta, draft: Self) -> Result<HttpResponse, AppError>;

    /// Rows for the list page. The default fetches the whole collection and
    /// pages it in memory.
    async fn load_table(
        api: &ApiClient,
        token: Option<&str>,
        scope: &RequestScope,
        query: &TableQuery,
    ) -> Result<TableView, ApiError> {
        let rows: Vec<Self::Record> = api.fetch_all(token, scope.token()).await?;
        Ok(DataTable::new(Self::BASE, Self::columns(), RowActions::edit_and_delete(Self::BASE))
            .sort(query.sort_spec())
            .paging(query.client_paging())
            .render(rows))
    }
}

/// Flash and log a failed mutation, then go back to the list so it is
/// refetched. An expired session is passed up to the route guard.
pub(crate) fn mutation_failed(
    session: &Session,
    what: &str,
    back_to: &str,
    e: ApiError,
) -> Result<HttpResponse, AppError> {
    if e.is_unauthorized() {
        return Err(e.into());
    }
    log::error!("{what} failed: {e}");
    set_flash(session, Flash::error("Error", format!("{what} failed. Please try again.")));
    Ok(see_other(back_to))
}

fn form_meta<P: EntityPage>(mode: DialogMode<'_, P::Record>, errors: Vec<String>) -> FormMeta {
    match mode {
        DialogMode::Create => FormMeta {
            title: format!("Add {}", P::NOUN),
            description: format!("Add a new {} entry", P::ENTRY),
            action: P::BASE.to_string(),
            submit_label: "Create".to_string(),
            cancel_url: P::BASE.to_string(),
            errors,
            image_url: None,
            image_required: true,
        },
        DialogMode::Edit(record) => FormMeta {
            title: format!("Edit {}", P::NOUN),
            description: format!("Edit the {} entry", P::ENTRY),
            action: format!("{}/{}", P::BASE, record.row_id()),
            submit_label: "Update".to_string(),
            cancel_url: P::BASE.to_string(),
            errors,
            image_url: P::image_url(record),
            image_required: false,
        },
    }
}

pub async fn list<P: EntityPage>(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    query: web::Query<TableQuery>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let table = P::load_table(&state.api, auth.token(), &scope, &query).await?;
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, P::BASE);
    render(ListTemplate {
        ctx,
        title: P::TITLE.to_string(),
        subtitle: P::SUBTITLE.to_string(),
        add: Some(AddButton { url: format!("{}/new", P::BASE), label: format!("Add {}", P::NOUN) }),
        table,
    })
}

pub async fn new_form<P: EntityPage + Default>(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, P::BASE);
    P::render_form(ctx, form_meta::<P>(DialogMode::Create, vec![]), P::default())
}

pub async fn create<P: EntityPage>(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = DialogForm::read(payload).await?;
    csrf::validate_csrf(&session, form.csrf_token())?;

    let scope = RequestScope::new();
    let draft = P::from_form(&form);
    let token = auth.token();

    match dialogs::submit(draft, DialogMode::Create, form.file.as_ref(), &state.api, token, scope.token()).await? {
        Submission::Rejected(draft, errors) => {
            let ctx = PageContext::build(&session, &auth, &state.config.app_name, P::BASE);
            P::render_form(ctx, form_meta::<P>(DialogMode::Create, errors), draft)
        }
        Submission::Ready(record) => match state.api.create(&record, token, scope.token()).await {
            Ok(()) => {
                set_flash(
                    &session,
                    Flash::success(P::DONE[0], format!("The {} entry has been created successfully.", P::ENTRY)),
                );
                Ok(see_other(P::BASE))
            }
            Err(e) => mutation_failed(&session, &format!("Creating {}", P::ENTRY), P::BASE, e),
        },
    }
}

pub async fn edit_form<P: EntityPage>(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let record: P::Record = state.api.fetch_one(&path, auth.token(), scope.token()).await?;
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, P::BASE);
    let draft = P::from_record(&record);
    P::render_form(ctx, form_meta::<P>(DialogMode::Edit(&record), vec![]), draft)
}

pub async fn update<P: EntityPage>(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = DialogForm::read(payload).await?;
    csrf::validate_csrf(&session, form.csrf_token())?;

    let scope = RequestScope::new();
    let token = auth.token();
    let id = path.into_inner();
    let original: P::Record = state.api.fetch_one(&id, token, scope.token()).await?;
    let mode = DialogMode::Edit(&original);
    let draft = P::from_form(&form);

    match dialogs::submit(draft, mode, form.file.as_ref(), &state.api, token, scope.token()).await? {
        Submission::Rejected(draft, errors) => {
            let ctx = PageContext::build(&session, &auth, &state.config.app_name, P::BASE);
            P::render_form(ctx, form_meta::<P>(mode, errors), draft)
        }
        Submission::Ready(record) => match state.api.update(&id, &record, token, scope.token()).await {
            Ok(()) => {
                set_flash(
                    &session,
                    Flash::success(P::DONE[1], format!("The {} entry has been updated successfully.", P::ENTRY)),
                );
                Ok(see_other(P::BASE))
            }
            Err(e) => mutation_failed(&session, &format!("Updating {}", P::ENTRY), P::BASE, e),
        },
    }
}

pub async fn delete<P: EntityPage>(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let scope = RequestScope::new();
    match state.api.remove::<P::Record>(&path, auth.token(), scope.token()).await {
        Ok(()) => {
            set_flash(
                &session,
                Flash::success(P::DONE[2], format!("The {} entry has been deleted successfully.", P::ENTRY)),
            );
            Ok(see_other(P::BASE))
        }
        Err(e) => mutation_failed(&session, &format!("Deleting {}", P::ENTRY), P::BASE, e),
    }
}
