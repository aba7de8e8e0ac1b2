use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::api::ApiError;

#[derive(Debug)]
pub enum AppError {
    Api(ApiError),
    Template(askama::Error),
    Session(String),
    Csrf,
    /// Malformed form post (bad multipart, oversized upload).
    Form(String),
    NotFound,
}

impl AppError {
    /// The API rejected the session's token. The route guard clears the
    /// session when a handler fails with this.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_unauthorized())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Form(e) => write!(f, "Form error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Api(e) if e.is_unauthorized() => StatusCode::SEE_OTHER,
            AppError::Api(ApiError::Status { status: 404, .. }) | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::Csrf => StatusCode::FORBIDDEN,
            AppError::Form(_) => StatusCode::BAD_REQUEST,
            AppError::Template(_) | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self.status_code() {
            StatusCode::SEE_OTHER => {
                log::info!("{self}; signing out");
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/login"))
                    .finish()
            }
            StatusCode::NOT_FOUND => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(include_str!("../templates/errors/404.html")),
            StatusCode::FORBIDDEN => HttpResponse::Forbidden().body(self.to_string()),
            StatusCode::BAD_REQUEST => HttpResponse::BadRequest().body(self.to_string()),
            StatusCode::BAD_GATEWAY => {
                log::error!("{self}");
                HttpResponse::BadGateway().body("The content service is unavailable. Please try again.")
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render a template into a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_statuses() {
        assert_eq!(AppError::Api(ApiError::Unauthorized(401)).status_code(), StatusCode::SEE_OTHER);
        assert!(AppError::Api(ApiError::Unauthorized(403)).is_unauthorized());
        let missing = ApiError::Status { status: 404, body: String::new() };
        assert_eq!(AppError::Api(missing).status_code(), StatusCode::NOT_FOUND);
        let down = ApiError::Status { status: 500, body: "boom".into() };
        assert_eq!(AppError::Api(down).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Csrf.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unauthorized_redirects_to_login() {
        let resp = AppError::Api(ApiError::Unauthorized(401)).error_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/login");
    }
}
