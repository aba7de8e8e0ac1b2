use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct HotelRecordId {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct HotelAuthResponse {
    #[serde(default)]
    hotel: Vec<HotelRecordId>,
    token: String,
}

/// Token and hotel scope of a signed-in hotel owner.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelLogin {
    pub token: String,
    pub hotel_id: String,
}

impl ApiClient {
    /// `POST /auth/login`, returns the admin bearer token.
    pub async fn admin_login(
        &self,
        creds: &Credentials<'_>,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        let resp: TokenResponse = self.post("/auth/login", creds, None, cancel).await?;
        Ok(resp.token)
    }

    /// `POST /hotels/auth`. The API answers with a one-element hotel list;
    /// its id scopes the collaborator session.
    pub async fn hotel_login(
        &self,
        creds: &Credentials<'_>,
        cancel: &CancellationToken,
    ) -> Result<HotelLogin, ApiError> {
        let resp: HotelAuthResponse = self.post("/hotels/auth", creds, None, cancel).await?;
        let hotel = resp
            .hotel
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Unexpected("hotel login returned no hotel".to_string()))?;
        Ok(HotelLogin { token: resp.token, hotel_id: hotel.id })
    }

    pub async fn logout(&self, token: &str, cancel: &CancellationToken) -> Result<(), ApiError> {
        self.delete("/auth/logout", Some(token), cancel).await
    }
}
