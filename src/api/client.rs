//! HTTP client for the external content API.
//!
//! Wraps a shared [`reqwest::Client`]. Authenticated calls carry the
//! session's bearer token; every call takes a [`CancellationToken`] and
//! aborts with [`ApiError::Cancelled`] once it fires.

use std::future::Future;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Errors from the content API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the bearer token (401) or the role (403).
    #[error("not authorized by content API ({0})")]
    Unauthorized(u16),

    /// Any other non-2xx status.
    #[error("content API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose body lacks something the console needs.
    #[error("unexpected response from content API: {0}")]
    Unexpected(String),

    /// The caller's cancellation token fired before the call completed.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// The API understood the request and refused it (401/403 or another
    /// 4xx), as opposed to being unreachable or failing itself.
    pub fn is_rejection(&self) -> bool {
        self.is_unauthorized() || matches!(self, ApiError::Status { status: 400..=499, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(s) => Some(*s),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Unexpected(_) | ApiError::Cancelled => None,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - API root, e.g. `http://localhost:5001/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builder for `path` under the base URL, with the bearer token attached
    /// when one is given.
    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Builder for an absolute URL outside the API (presigned storage uploads).
    /// Never carries the bearer token.
    pub(crate) fn external(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        cancellable(cancel, async {
            let response = Self::check_status(builder.send().await?).await?;
            Ok(response.json::<T>().await?)
        })
        .await
    }

    pub(crate) async fn send_empty(
        &self,
        builder: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        cancellable(cancel, async {
            Self::check_status(builder.send().await?).await?;
            Ok(())
        })
        .await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, path, token), cancel).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::POST, path, token).json(body), cancel).await
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::POST, path, token).json(body), cancel).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::PUT, path, token).json(body), cancel).await
    }

    pub async fn delete(
        &self,
        path: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, path, token), cancel).await
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized(status.as_u16()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Race `fut` against the cancellation token. A token that is already
/// cancelled wins without polling `fut`.
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        res = fut => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = ApiClient::with_client(reqwest::Client::new(), "http://api.local/api/");
        assert_eq!(api.base_url(), "http://api.local/api");
        assert_eq!(api.url("/hotels"), "http://api.local/api/hotels");
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(ApiError::Unauthorized(401).status(), Some(401));
        assert!(ApiError::Unauthorized(403).is_unauthorized());
        let e = ApiError::Status { status: 500, body: "boom".into() };
        assert_eq!(e.status(), Some(500));
        assert!(!e.is_unauthorized());
        assert_eq!(ApiError::Cancelled.status(), None);
    }

    #[test]
    fn rejections_are_4xx_only() {
        assert!(ApiError::Unauthorized(401).is_rejection());
        assert!(ApiError::Status { status: 400, body: String::new() }.is_rejection());
        assert!(ApiError::Status { status: 404, body: String::new() }.is_rejection());
        assert!(!ApiError::Status { status: 502, body: String::new() }.is_rejection());
        assert!(!ApiError::Unexpected("no hotel".into()).is_rejection());
        assert!(!ApiError::Cancelled.is_rejection());
    }

    #[actix_rt::test]
    async fn cancelled_token_short_circuits() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let res: Result<u8, ApiError> = cancellable(&cancel, async { Ok(1) }).await;
        assert!(matches!(res, Err(ApiError::Cancelled)));
    }

    #[actix_rt::test]
    async fn live_token_passes_result_through() {
        let cancel = CancellationToken::new();
        let res: Result<u8, ApiError> = cancellable(&cancel, async { Ok(7) }).await;
        assert_eq!(res.unwrap(), 7);
    }
}
