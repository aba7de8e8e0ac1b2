use askama::Template;

use crate::models::booking::Booking;
use crate::models::data_table::TableView;
use crate::models::hotel::Hotel;
use crate::models::query::Query;

use super::{PageContext, SelectOption};

/// Booking detail with the status control. `delete_action` is None on the
/// hotel owner's view.
#[derive(Template)]
#[template(path = "bookings/detail.html")]
pub struct BookingDetailTemplate {
    pub ctx: PageContext,
    pub booking: Booking,
    pub created_on: String,
    pub statuses: Vec<SelectOption>,
    pub status_action: String,
    pub delete_action: Option<String>,
    pub back_url: String,
}

#[derive(Template)]
#[template(path = "queries/detail.html")]
pub struct QueryDetailTemplate {
    pub ctx: PageContext,
    pub query: Query,
    pub created_at: String,
    pub back_url: String,
}

/// A hotel owner's landing page: hotel heading, update link, bookings.
#[derive(Template)]
#[template(path = "hotel_booking/index.html")]
pub struct HotelBookingTemplate {
    pub ctx: PageContext,
    pub hotel: Hotel,
    pub edit_url: String,
    pub table: TableView,
}
