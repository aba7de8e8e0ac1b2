use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Session entry holding the whole auth state.
pub const AUTH_KEY: &str = "auth-storage";
const FLASH_KEY: &str = "flash";

/// Effective role derived from the session flags. Admin wins over
/// collaborator; no token means guest regardless of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Collaborator,
    Admin,
}

impl Role {
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Collaborator)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Collaborator => "Hotel owner",
            Role::Admin => "Administrator",
        }
    }
}

/// Persisted auth state. The route guard loads it once per request and puts
/// a copy in the request extensions; handlers take it as
/// `web::ReqData<AuthState>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub token: Option<String>,
    pub admin: bool,
    pub collaborator: bool,
    pub hotel_id: Option<String>,
}

impl AuthState {
    pub fn signed_in_admin(token: &str) -> Self {
        AuthState { token: Some(token.to_string()), admin: true, collaborator: false, hotel_id: None }
    }

    pub fn signed_in_collaborator(token: &str, hotel_id: &str) -> Self {
        AuthState {
            token: Some(token.to_string()),
            admin: false,
            collaborator: true,
            hotel_id: Some(hotel_id.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn role(&self) -> Role {
        match self.token() {
            None => Role::Guest,
            Some(_) if self.admin => Role::Admin,
            Some(_) if self.collaborator => Role::Collaborator,
            Some(_) => Role::Guest,
        }
    }
}

/// The session store: typed access to the `auth-storage` entry.
pub struct SessionStore<'a> {
    session: &'a Session,
}

impl<'a> SessionStore<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Current state; a missing or unreadable entry reads as signed out.
    pub fn state(&self) -> AuthState {
        self.session.get::<AuthState>(AUTH_KEY).unwrap_or(None).unwrap_or_default()
    }

    fn save(&self, state: &AuthState) -> Result<(), AppError> {
        self.session
            .insert(AUTH_KEY, state)
            .map_err(|e| AppError::Session(format!("Failed to store auth state: {e}")))
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) -> Result<(), AppError> {
        let mut state = self.state();
        f(&mut state);
        self.save(&state)
    }

    pub fn set_token(&self, token: &str) -> Result<(), AppError> {
        self.update(|s| s.token = Some(token.to_string()))
    }

    pub fn clear_token(&self) -> Result<(), AppError> {
        self.update(|s| s.token = None)
    }

    pub fn set_admin(&self, admin: bool) -> Result<(), AppError> {
        self.update(|s| s.admin = admin)
    }

    pub fn set_collaborator(&self, collaborator: bool) -> Result<(), AppError> {
        self.update(|s| s.collaborator = collaborator)
    }

    /// Replaces any previous state, so the role flags never both hold.
    pub fn sign_in_admin(&self, token: &str) -> Result<(), AppError> {
        self.session.renew();
        self.save(&AuthState::signed_in_admin(token))
    }

    pub fn sign_in_collaborator(&self, token: &str, hotel_id: &str) -> Result<(), AppError> {
        self.session.renew();
        self.save(&AuthState::signed_in_collaborator(token, hotel_id))
    }

    /// Logout: drops the auth entry together with the CSRF token.
    pub fn clear(&self) {
        self.session.purge();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub title: String,
    pub detail: String,
}

impl Flash {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Flash { kind: FlashKind::Success, title: title.into(), detail: detail.into() }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Flash { kind: FlashKind::Error, title: title.into(), detail: detail.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }
}

pub fn set_flash(session: &Session, flash: Flash) {
    let _ = session.insert(FLASH_KEY, flash);
}

pub fn take_flash(session: &Session) -> Option<Flash> {
    let flash = session.get::<Flash>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
