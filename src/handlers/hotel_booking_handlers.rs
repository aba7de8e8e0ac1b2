//! Hotel-scoped pages: one hotel's bookings and its own profile. Reached by
//! the collaborator signed in for that hotel, or by an admin.

use actix_multipart::Multipart;
use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::api::RequestScope;
use crate::auth::csrf;
use crate::auth::session::{AuthState, Flash, set_flash};
use crate::dialogs::hotel::HotelDraft;
use crate::dialogs::{self, DialogForm, DialogMode, EntityDialog, Submission};
use crate::errors::{AppError, render};
use crate::handlers::booking_handlers::{StatusForm, change_status, pick, render_detail};
use crate::handlers::crud::mutation_failed;
use crate::handlers::see_other;
use crate::models::booking;
use crate::models::data_table::{DataTable, RowActions, TableQuery};
use crate::models::hotel::Hotel;
use crate::templates_structs::{FormMeta, HotelBookingTemplate, HotelFormTemplate, PageContext};

fn base(hotel_id: &str) -> String {
    format!("/hotel-booking/{hotel_id}")
}

fn edit_meta(hotel: &Hotel, errors: Vec<String>) -> FormMeta {
    let base = base(&hotel.id);
    FormMeta {
        title: "Update Hotel Data".to_string(),
        description: "Edit the hotel entry".to_string(),
        action: format!("{base}/edit"),
        submit_label: "Update".to_string(),
        cancel_url: base,
        errors,
        image_url: hotel.image.clone(),
        image_required: false,
    }
}

pub async fn index(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
    query: web::Query<TableQuery>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let hotel_id = path.into_inner();
    let token = auth.token();
    let hotel: Hotel = state.api.fetch_one(&hotel_id, token, scope.token()).await?;
    let bookings = state.api.fetch_hotel_bookings(&hotel_id, token, scope.token()).await?;

    let base = base(&hotel_id);
    let table = DataTable::new(&base, booking::hotel_columns(), RowActions::detail(&format!("{base}/bookings"), false))
        .sort(query.sort_spec())
        .paging(query.client_paging())
        .render(bookings);
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, &base);
    render(HotelBookingTemplate { ctx, hotel, edit_url: format!("{base}/edit"), table })
}

pub async fn edit_form(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let hotel: Hotel = state.api.fetch_one(&path, auth.token(), scope.token()).await?;
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, &base(&hotel.id));
    let draft = HotelDraft::from_record(&hotel);
    render(HotelFormTemplate { ctx, form: edit_meta(&hotel, vec![]), draft })
}

/// "Update Hotel Data". The image is optional; without one the stored key
/// is kept.
pub async fn update(
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
    let hotel_id = path.into_inner();
    let back = base(&hotel_id);
    let original: Hotel = state.api.fetch_one(&hotel_id, token, scope.token()).await?;
    let draft = HotelDraft::from_form(&form);

    match dialogs::submit(draft, DialogMode::Edit(&original), form.file.as_ref(), &state.api, token, scope.token()).await? {
        Submission::Rejected(draft, errors) => {
            let ctx = PageContext::build(&session, &auth, &state.config.app_name, &back);
            render(HotelFormTemplate { ctx, form: edit_meta(&original, errors), draft })
        }
        Submission::Ready(record) => match state.api.update(&hotel_id, &record, token, scope.token()).await {
            Ok(()) => {
                set_flash(&session, Flash::success("Hotel updated", "The hotel entry has been updated successfully."));
                Ok(see_other(&back))
            }
            Err(e) => mutation_failed(&session, "Updating hotel", &back, e),
        },
    }
}

pub async fn booking_detail(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let scope = RequestScope::new();
    let (hotel_id, booking_id) = path.into_inner();
    let bookings = state.api.fetch_hotel_bookings(&hotel_id, auth.token(), scope.token()).await?;
    let booking = pick(bookings, &booking_id)?;

    let base = base(&hotel_id);
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, &base);
    render_detail(ctx, booking, format!("{base}/bookings/{booking_id}/status"), None, base)
}

pub async fn update_booking_status(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    path: web::Path<(String, String)>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let scope = RequestScope::new();
    let (hotel_id, booking_id) = path.into_inner();
    let back = base(&hotel_id);
    let token = auth.token();

    // The status endpoint is keyed by booking id alone; make sure the
    // booking is one of this hotel's before touching it.
    let bookings = state.api.fetch_hotel_bookings(&hotel_id, token, scope.token()).await?;
    pick(bookings, &booking_id)?;

    match change_status(&state.api, token, scope.token(), &booking_id, &form).await {
        Ok(flash) => {
            set_flash(&session, flash);
            Ok(see_other(&back))
        }
        Err(e) => mutation_failed(&session, "Updating booking status", &back, e),
    }
}
