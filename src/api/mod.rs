//! Content API access: the HTTP wrapper plus typed endpoints per resource.

pub mod auth;
pub mod cancel;
pub mod client;
pub mod upload;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

pub use cancel::RequestScope;
pub use client::{ApiClient, ApiError};
pub use upload::UploadFile;

use crate::models::advertisement::Advertisement;
use crate::models::booking::{Booking, BookingStatus, StatusUpdate};
use crate::models::hotel::Hotel;
use crate::models::news::{News, NewsPage};
use crate::models::query::Query;
use crate::models::temple::Temple;

/// A REST collection under the API root: `GET {PATH}`, `GET|PUT|DELETE
/// {PATH}/{id}`, `POST {PATH}`.
pub trait Collection: DeserializeOwned {
    const PATH: &'static str;
}

impl Collection for Hotel {
    const PATH: &'static str = "/hotels";
}

impl Collection for Temple {
    const PATH: &'static str = "/temples";
}

impl Collection for News {
    const PATH: &'static str = "/news";
}

impl Collection for Advertisement {
    const PATH: &'static str = "/advertisements";
}

impl Collection for Booking {
    const PATH: &'static str = "/bookings";
}

impl Collection for Query {
    const PATH: &'static str = "/queries";
}

impl ApiClient {
    pub async fn fetch_all<R: Collection>(
        &self,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, ApiError> {
        self.get(R::PATH, token, cancel).await
    }

    pub async fn fetch_one<R: Collection>(
        &self,
        id: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        self.get(&format!("{}/{id}", R::PATH), token, cancel).await
    }

    pub async fn create<R: Collection + Serialize>(
        &self,
        record: &R,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.post_unit(R::PATH, record, token, cancel).await
    }

    pub async fn update<R: Collection + Serialize>(
        &self,
        id: &str,
        record: &R,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.put(&format!("{}/{id}", R::PATH), record, token, cancel).await
    }

    pub async fn remove<R: Collection>(
        &self,
        id: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.delete(&format!("{}/{id}", R::PATH), token, cancel).await
    }

    /// `GET /news?page&limit`; the API owns news paging.
    pub async fn fetch_news_page(
        &self,
        page: u32,
        limit: u32,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<NewsPage, ApiError> {
        self.get(&format!("/news?page={page}&limit={limit}"), token, cancel).await
    }

    pub async fn fetch_hotel_bookings(
        &self,
        hotel_id: &str,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Booking>, ApiError> {
        self.get(&format!("/bookings/hotel/{hotel_id}"), token, cancel).await
    }

    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.put(&format!("/bookings/{id}/status"), &StatusUpdate { status }, token, cancel).await
    }
}
