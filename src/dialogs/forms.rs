use std::collections::HashMap;

use actix_multipart::Multipart;
use futures::StreamExt;

use crate::api::UploadFile;
use crate::errors::AppError;

/// Largest accepted image.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;
/// Largest accepted text field (rich-text bodies included).
pub const MAX_TEXT_BYTES: usize = 1024 * 1024;

/// Name of the file input in every dialog.
pub const IMAGE_FIELD: &str = "image";

/// A submitted dialog: text fields by name plus the chosen image, if any.
#[derive(Debug, Default, Clone)]
pub struct DialogForm {
    fields: HashMap<String, String>,
    pub file: Option<UploadFile>,
}

impl DialogForm {
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>, file: Option<UploadFile>) -> Self {
        DialogForm {
            fields: fields.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            file,
        }
    }

    /// Field value, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Checkbox state: present and not "false".
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|v| v != "false")
    }

    pub fn csrf_token(&self) -> &str {
        self.fields.get("csrf_token").map(String::as_str).unwrap_or("")
    }

    /// Drain a multipart body. An empty file input (no name or no bytes)
    /// reads as no file.
    pub async fn read(mut payload: Multipart) -> Result<Self, AppError> {
        let mut form = DialogForm::default();

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| AppError::Form(format!("Malformed form: {e}")))?;
            let disposition = field.content_disposition();
            let name = disposition.and_then(|cd| cd.get_name()).unwrap_or("").to_string();
            let file_name = disposition.and_then(|cd| cd.get_filename()).map(str::to_string);
            let content_type = field.content_type().map(|m| m.to_string());

            let limit = if file_name.is_some() { MAX_FILE_BYTES } else { MAX_TEXT_BYTES };
            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| AppError::Form(format!("Malformed form: {e}")))?;
                if bytes.len() + chunk.len() > limit {
                    return Err(AppError::Form(format!("Field '{name}' is larger than {limit} bytes")));
                }
                bytes.extend_from_slice(&chunk);
            }

            match file_name {
                Some(file_name) if name == IMAGE_FIELD => {
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.file = Some(UploadFile {
                            file_name,
                            content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
                            bytes,
                        });
                    }
                }
                Some(_) => {}
                None => {
                    let value = String::from_utf8(bytes)
                        .map_err(|_| AppError::Form(format!("Field '{name}' is not valid UTF-8")))?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }
}
