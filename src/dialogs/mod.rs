//! Entity dialogs: typed drafts seeded from a record or a submitted form,
//! field validation, and the upload-then-assemble submission step.

pub mod advertisement;
pub mod forms;
pub mod hotel;
pub mod news;
pub mod temple;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, Collection, UploadFile};
use crate::errors::AppError;
use crate::models::common::StorageKey;
use crate::models::data_table::TableRow;

pub use forms::DialogForm;

pub const IMAGE_REQUIRED: &str = "Please upload an image";
pub const UPLOAD_FAILED: &str = "Failed to upload file";

/// Create, or edit of an existing record.
#[derive(Debug)]
pub enum DialogMode<'a, R> {
    Create,
    Edit(&'a R),
}

impl<R> Clone for DialogMode<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for DialogMode<'_, R> {}

impl<R> DialogMode<'_, R> {
    pub fn is_create(&self) -> bool {
        matches!(self, DialogMode::Create)
    }
}

pub trait EntityDialog: Sized {
    type Record: Collection + Serialize + Clone + Default + TableRow;

    /// Singular noun for titles and messages, e.g. "Hotel".
    const NOUN: &'static str;

    fn from_form(form: &DialogForm) -> Self;

    fn from_record(record: &Self::Record) -> Self;

    /// Field errors in display order. The image check is done by [`submit`].
    fn validate(&self, mode: DialogMode<'_, Self::Record>) -> Vec<String>;

    /// Copy the draft onto `base`. Only called on a draft that validated.
    fn apply(self, base: &mut Self::Record, mode: DialogMode<'_, Self::Record>);

    fn key_of(record: &Self::Record) -> Option<&StorageKey>;

    fn set_key(record: &mut Self::Record, key: Option<StorageKey>);
}

/// The key a submission stores: the fresh upload when there was one,
/// otherwise the record's existing key.
pub fn resolve_key(uploaded: Option<StorageKey>, previous: Option<&StorageKey>) -> Option<StorageKey> {
    uploaded.or_else(|| previous.cloned())
}

/// Build the record to send. Edit starts from the original record so its
/// `_id` and any fields the dialog does not show go back unchanged.
pub fn assemble<D: EntityDialog>(
    draft: D,
    mode: DialogMode<'_, D::Record>,
    uploaded: Option<StorageKey>,
) -> D::Record {
    let mut record = match mode {
        DialogMode::Create => D::Record::default(),
        DialogMode::Edit(original) => original.clone(),
    };
    let previous = match mode {
        DialogMode::Create => None,
        DialogMode::Edit(original) => D::key_of(original),
    };
    let key = resolve_key(uploaded, previous);
    draft.apply(&mut record, mode);
    D::set_key(&mut record, key);
    record
}

/// Result of a dialog submission.
pub enum Submission<D: EntityDialog> {
    /// Record ready for the create/update call.
    Ready(D::Record),
    /// Re-render the dialog with the draft and these messages.
    Rejected(D, Vec<String>),
}

/// Validate, upload the chosen image, and assemble the record. A create
/// without a file is rejected before any request. An upload failure other
/// than an expired session comes back as a dialog error.
pub async fn submit<D: EntityDialog>(
    draft: D,
    mode: DialogMode<'_, D::Record>,
    file: Option<&UploadFile>,
    api: &ApiClient,
    token: Option<&str>,
    cancel: &CancellationToken,
) -> Result<Submission<D>, AppError> {
    let mut errors = Vec::new();
    if mode.is_create() && file.is_none() {
        errors.push(IMAGE_REQUIRED.to_string());
    }
    errors.extend(draft.validate(mode));
    if !errors.is_empty() {
        return Ok(Submission::Rejected(draft, errors));
    }

    let uploaded = match api.upload_image(file, token, cancel).await {
        Ok(key) => key,
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            log::error!("{} image upload failed: {e}", D::NOUN);
            return Ok(Submission::Rejected(draft, vec![UPLOAD_FAILED.to_string()]));
        }
    };

    Ok(Submission::Ready(assemble(draft, mode, uploaded)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_upload_wins_over_previous_key() {
        let old = StorageKey("uploads/old.jpg".into());
        let new = StorageKey("uploads/new.jpg".into());
        assert_eq!(resolve_key(Some(new.clone()), Some(&old)), Some(new));
        assert_eq!(resolve_key(None, Some(&old)), Some(old));
        assert_eq!(resolve_key(None, None), None);
    }
}
