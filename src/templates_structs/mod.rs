// Template context structures for Askama templates, organized by domain.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{AuthState, Flash, take_flash};
use crate::models::nav_item::{self, NavSidebarItem};

pub mod auth;
pub mod booking;
pub mod entity;

pub use auth::*;
pub use booking::*;
pub use entity::*;

/// Common context shared by all console pages.
/// Templates access these as `ctx.flash`, `ctx.sidebar_items`, etc.
pub struct PageContext {
    pub role_label: String,
    pub signed_in: bool,
    pub flash: Option<Flash>,
    pub sidebar_items: Vec<NavSidebarItem>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, auth: &AuthState, app_name: &str, current_path: &str) -> Self {
        let role = auth.role();
        Self {
            role_label: role.label().to_string(),
            signed_in: role.is_staff(),
            flash: take_flash(session),
            sidebar_items: nav_item::find_navigation(auth, current_path),
            app_name: app_name.to_string(),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
