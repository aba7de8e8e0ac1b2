use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::AppState;
use crate::api::{ApiClient, ApiError, RequestScope};
use crate::auth::csrf;
use crate::auth::session::{AuthState, Flash, set_flash};
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, see_other};
use crate::handlers::crud::mutation_failed;
use crate::models::booking::{self, Booking, BookingStatus};
use crate::models::common::format_date;
use crate::models::data_table::{DataTable, RowActions, TableQuery};
use crate::templates_structs::{BookingDetailTemplate, ListTemplate, PageContext, SelectOption};

const BASE: &str = "/bookings";

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
    pub csrf_token: String,
}

/// Bookings have no single-record endpoint; pick the row out of a listing.
pub(crate) fn pick(bookings: Vec<Booking>, id: &str) -> Result<Booking, AppError> {
    bookings.into_iter().find(|b| b.id == id).ok_or(AppError::NotFound)
}

async fn find(api: &ApiClient, token: Option<&str>, cancel: &CancellationToken, id: &str) -> Result<Booking, AppError> {
    pick(api.fetch_all::<Booking>(token, cancel).await?, id)
}

pub(crate) fn render_detail(
    ctx: PageContext,
    booking: Booking,
    status_action: String,
    delete_action: Option<String>,
    back_url: String,
) -> Result<HttpResponse, AppError> {
    let created_on = booking.created_at.as_ref().map(format_date).unwrap_or_default();
    let statuses = SelectOption::list(BookingStatus::ALL.iter().map(|s| s.as_str()), booking.status.as_str());
    render(BookingDetailTemplate { ctx, booking, created_on, statuses, status_action, delete_action, back_url })
}

/// Apply a status change from the detail form. Any status may follow any
/// other. Returns the flash to show.
pub(crate) async fn change_status(
    api: &ApiClient,
    token: Option<&str>,
    cancel: &CancellationToken,
    id: &str,
    form: &StatusForm,
) -> Result<Flash, ApiError> {
    let Some(status) = BookingStatus::parse(&form.status) else {
        return Ok(Flash::error("Error", format!("Unknown booking status '{}'", form.status)));
    };
    api.update_booking_status(id, status, token, cancel).await?;
    Ok(Flash::success("Booking updated", format!("The booking is now {status}.")))
}

pub async fn list(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    query: web::Query<TableQuery>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let rows: Vec<Booking> = state.api.fetch_all(auth.token(), scope.token()).await?;
    let table = DataTable::new(BASE, booking::columns(), RowActions::detail(BASE, true))
        .sort(query.sort_spec())
        .paging(query.client_paging())
        .render(rows);
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, BASE);
    render(ListTemplate {
        ctx,
        title: "Bookings".to_string(),
        subtitle: "Manage hotel bookings".to_string(),
        add: None,
        table,
    })
}

pub async fn detail(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let id = path.into_inner();
    let booking = find(&state.api, auth.token(), scope.token(), &id).await?;
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, BASE);
    render_detail(
        ctx,
        booking,
        format!("{BASE}/{id}/status"),
        Some(format!("{BASE}/{id}/delete")),
        BASE.to_string(),
    )
}

pub async fn update_status(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let scope = RequestScope::new();
    match change_status(&state.api, auth.token(), scope.token(), &path, &form).await {
        Ok(flash) => {
            set_flash(&session, flash);
            Ok(see_other(BASE))
        }
        Err(e) => mutation_failed(&session, "Updating booking status", BASE, e),
    }
}

pub async fn delete(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let scope = RequestScope::new();
    match state.api.remove::<Booking>(&path, auth.token(), scope.token()).await {
        Ok(()) => {
            set_flash(&session, Flash::success("Booking deleted", "The booking has been deleted successfully."));
            Ok(see_other(BASE))
        }
        Err(e) => mutation_failed(&session, "Deleting booking", BASE, e),
    }
}
