use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::AppState;
use crate::api::{ApiError, RequestScope};
use crate::api::auth::Credentials;
use crate::auth::csrf;
use crate::auth::session::{AuthState, Role, SessionStore};
use crate::errors::{AppError, render};
use crate::handlers::{CsrfOnly, see_other};
use crate::models::nav_item;
use crate::templates_structs::{HotelLoginTemplate, LoginTemplate, PageContext};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const SIGN_IN_UNAVAILABLE: &str = "Sign-in is unavailable right now. Please try again later.";

/// Message for a failed sign-in: bad credentials only when the API said so.
fn sign_in_error(e: &ApiError) -> String {
    let message = if e.is_rejection() { INVALID_CREDENTIALS } else { SIGN_IN_UNAVAILABLE };
    message.to_string()
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

/// `/` sends each role to its landing page.
pub async fn home(auth: web::ReqData<AuthState>) -> HttpResponse {
    see_other(&nav_item::home_for(&auth))
}

pub async fn login_page(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = SessionStore::new(&session).state();
    if auth.role() == Role::Admin {
        return Ok(see_other(&nav_item::home_for(&auth)));
    }

    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate {
        error: None,
        email: String::new(),
        app_name: state.config.app_name.clone(),
        csrf_token,
    })
}

pub async fn login_submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let scope = RequestScope::new();
    let creds = Credentials { email: form.email.trim(), password: &form.password };
    match state.api.admin_login(&creds, scope.token()).await {
        Ok(token) => {
            SessionStore::new(&session).sign_in_admin(&token)?;
            log::info!("Admin '{}' signed in", creds.email);
            Ok(see_other("/hotels"))
        }
        Err(e) => {
            log::warn!("Admin sign-in failed for '{}': {e}", creds.email);
            let csrf_token = csrf::get_or_create_token(&session);
            render(LoginTemplate {
                error: Some(sign_in_error(&e)),
                email: creds.email.to_string(),
                app_name: state.config.app_name.clone(),
                csrf_token,
            })
        }
    }
}

pub async fn hotel_login_page(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &auth, &state.config.app_name, "/hotel-login");
    render(HotelLoginTemplate { ctx, error: None, email: String::new() })
}

pub async fn hotel_login_submit(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthState>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let scope = RequestScope::new();
    let creds = Credentials { email: form.email.trim(), password: &form.password };
    match state.api.hotel_login(&creds, scope.token()).await {
        Ok(login) => {
            SessionStore::new(&session).sign_in_collaborator(&login.token, &login.hotel_id)?;
            log::info!("Hotel owner '{}' signed in for hotel {}", creds.email, login.hotel_id);
            Ok(see_other(&format!("/hotel-booking/{}", login.hotel_id)))
        }
        Err(e) => {
            log::warn!("Hotel sign-in failed for '{}': {e}", creds.email);
            let ctx = PageContext::build(&session, &auth, &state.config.app_name, "/hotel-login");
            render(HotelLoginTemplate {
                ctx,
                error: Some(sign_in_error(&e)),
                email: creds.email.to_string(),
            })
        }
    }
}

/// Revokes the token with the API when possible, then always clears the
/// session.
pub async fn logout(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let store = SessionStore::new(&session);
    if let Some(token) = store.state().token() {
        let scope = RequestScope::new();
        if let Err(e) = state.api.logout(token, scope.token()).await {
            log::warn!("API logout failed: {e}");
        }
    }
    store.clear();
    log::info!("Signed out");
    Ok(see_other("/login"))
}
