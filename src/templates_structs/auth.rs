use askama::Template;

use super::PageContext;

/// Admin sign-in. Standalone page, no sidebar.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
    pub app_name: String,
    pub csrf_token: String,
}

/// Hotel owner sign-in, shown inside the console layout.
#[derive(Template)]
#[template(path = "hotel_login.html")]
pub struct HotelLoginTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub email: String,
}
