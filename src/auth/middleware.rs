use actix_session::SessionExt;
use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::auth::session::{AuthState, Flash, SessionStore, set_flash};
use crate::errors::AppError;
use crate::handlers::see_other;
use crate::models::nav_item;

/// Outcome of checking a path against the route table.
#[derive(Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not signed in.
    Login,
    /// Signed in, but not for this route.
    Home(String),
}

pub fn decide(auth: &AuthState, path: &str) -> GuardDecision {
    if nav_item::permits(auth, path) {
        GuardDecision::Allow
    } else if !auth.role().is_staff() {
        GuardDecision::Login
    } else {
        GuardDecision::Home(nav_item::home_for(auth))
    }
}

/// Route guard. Runs before every handler: loads the session's auth state,
/// enforces the route table, and hands the state to handlers through the
/// request extensions. When a handler fails because the API rejected the
/// token, the session is cleared here so the next page is the login form.
pub async fn route_guard(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let auth = SessionStore::new(&session).state();

    match decide(&auth, req.path()) {
        GuardDecision::Allow => {}
        GuardDecision::Login => {
            return Ok(req.into_response(see_other("/login")).map_into_right_body());
        }
        GuardDecision::Home(home) => {
            log::info!("{} denied {} for {:?}", req.method(), req.path(), auth.role());
            set_flash(&session, Flash::error("Access denied", "You do not have access to that page."));
            return Ok(req.into_response(see_other(&home)).map_into_right_body());
        }
    }

    req.extensions_mut().insert(auth);
    let res = next.call(req).await?;

    let expired = res
        .response()
        .error()
        .and_then(|e| e.as_error::<AppError>())
        .is_some_and(AppError::is_unauthorized);
    if expired {
        SessionStore::new(&res.request().get_session()).clear();
    }

    Ok(res.map_into_left_body())
}
