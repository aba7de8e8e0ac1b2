//! Two-phase image upload: ask the API for a presigned destination, then PUT
//! the bytes straight to storage.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{ApiClient, ApiError};
use crate::models::common::StorageKey;

/// A file chosen in a dialog, read fully into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    file_name: &'a str,
    file_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PresignedUpload {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    pub key: StorageKey,
}

impl ApiClient {
    pub async fn presign(
        &self,
        file: &UploadFile,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PresignedUpload, ApiError> {
        let body = PresignRequest { file_name: &file.file_name, file_type: &file.content_type };
        self.post("/upload/generate-presigned-url", &body, token, cancel).await
    }

    /// Upload `file` if one was chosen. `None` in means `None` out and no
    /// request is made; the caller keeps whatever key it had.
    pub async fn upload_image(
        &self,
        file: Option<&UploadFile>,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<StorageKey>, ApiError> {
        let Some(file) = file else {
            return Ok(None);
        };
        let presigned = self.presign(file, token, cancel).await?;

        let put = self
            .external(Method::PUT, &presigned.upload_url)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.bytes.clone());
        // Storage answers 403 for a bad signature; that says nothing about
        // the console session.
        self.send_empty(put, cancel).await.map_err(|e| match e {
            ApiError::Unauthorized(status) => ApiError::Status {
                status,
                body: "storage rejected the upload".to_string(),
            },
            other => other,
        })?;

        log::info!("Uploaded {} as {}", file.file_name, presigned.key);
        Ok(Some(presigned.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presign_wire_format() {
        let body = PresignRequest { file_name: "ghat.jpg", file_type: "image/jpeg" };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"fileName": "ghat.jpg", "fileType": "image/jpeg"})
        );
        let resp: PresignedUpload =
            serde_json::from_str(r#"{"uploadURL": "https://s3/put", "key": "uploads/ghat.jpg"}"#).unwrap();
        assert_eq!(resp.key.as_str(), "uploads/ghat.jpg");
    }

    #[actix_rt::test]
    async fn no_file_means_no_request() {
        // Unroutable base URL: any request would fail.
        let api = ApiClient::with_client(reqwest::Client::new(), "http://127.0.0.1:1/api");
        let key = api.upload_image(None, Some("t"), &CancellationToken::new()).await.unwrap();
        assert_eq!(key, None);
    }
}
