use actix_web::HttpResponse;
use serde::Deserialize;

pub mod advertisement_handlers;
pub mod auth_handlers;
pub mod booking_handlers;
pub mod crud;
pub mod hotel_booking_handlers;
pub mod hotel_handlers;
pub mod news_handlers;
pub mod query_handlers;
pub mod temple_handlers;

/// Body of the delete and logout buttons.
#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Post/redirect/get.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
