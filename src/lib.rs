//! Admin console for the haridwarlive.in portal. Server-rendered pages over
//! the portal's REST API: hotels, temples, news, advertisements, bookings
//! and tourist queries, plus the hotel owner's booking view.

use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{HttpResponse, cookie::Key, web};

pub mod api;
pub mod auth;
pub mod config;
pub mod dialogs;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;

use api::ApiClient;
use config::AppConfig;
use dialogs::advertisement::AdvertisementDraft;
use dialogs::hotel::HotelDraft;
use dialogs::news::NewsDraft;
use dialogs::temple::TempleDraft;
use handlers::crud::{self, EntityPage};

/// Shared by every worker.
pub struct AppState {
    pub api: ApiClient,
    pub config: AppConfig,
}

pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .build()
}

/// List, dialog and delete routes for one entity page. `/new` goes before
/// `/{id}` so it is not taken for an id.
fn entity_routes<P: EntityPage + Default + 'static>(cfg: &mut web::ServiceConfig) {
    let base = P::BASE;
    cfg.route(base, web::get().to(crud::list::<P>))
        .route(base, web::post().to(crud::create::<P>))
        .route(&format!("{base}/new"), web::get().to(crud::new_form::<P>))
        .route(&format!("{base}/{{id}}/edit"), web::get().to(crud::edit_form::<P>))
        .route(&format!("{base}/{{id}}"), web::post().to(crud::update::<P>))
        .route(&format!("{base}/{{id}}/delete"), web::post().to(crud::delete::<P>));
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    use handlers::{auth_handlers, booking_handlers, hotel_booking_handlers, query_handlers};

    cfg.service(Files::new("/static", "./static"))
        .route("/", web::get().to(auth_handlers::home))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/hotel-login", web::get().to(auth_handlers::hotel_login_page))
        .route("/hotel-login", web::post().to(auth_handlers::hotel_login_submit))
        .route("/logout", web::post().to(auth_handlers::logout));

    entity_routes::<HotelDraft>(cfg);
    entity_routes::<TempleDraft>(cfg);
    entity_routes::<NewsDraft>(cfg);
    entity_routes::<AdvertisementDraft>(cfg);

    cfg.route("/bookings", web::get().to(booking_handlers::list))
        .route("/bookings/{id}", web::get().to(booking_handlers::detail))
        .route("/bookings/{id}/status", web::post().to(booking_handlers::update_status))
        .route("/bookings/{id}/delete", web::post().to(booking_handlers::delete))
        .route("/queries", web::get().to(query_handlers::list))
        .route("/queries/{id}", web::get().to(query_handlers::detail))
        .route("/hotel-booking/{hotel_id}", web::get().to(hotel_booking_handlers::index))
        .route("/hotel-booking/{hotel_id}/edit", web::get().to(hotel_booking_handlers::edit_form))
        .route("/hotel-booking/{hotel_id}/edit", web::post().to(hotel_booking_handlers::update))
        .route(
            "/hotel-booking/{hotel_id}/bookings/{id}",
            web::get().to(hotel_booking_handlers::booking_detail),
        )
        .route(
            "/hotel-booking/{hotel_id}/bookings/{id}/status",
            web::post().to(hotel_booking_handlers::update_booking_status),
        )
        // Default 404 handler (must be registered last)
        .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../templates/errors/404.html"))
}
