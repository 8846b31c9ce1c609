//! Best-effort draft persistence on top of a [`KeyValueStore`].
//!
//! Failures here never reach the user: they are logged and the form carries on.

use super::error::StorageError;
use super::store::KeyValueStore;
use crate::model::FormFields;

/// Loads the draft stored under `key`.
///
/// Absent, unreadable and malformed drafts all yield `None`.
pub fn load_draft(store: &dyn KeyValueStore, key: &str) -> Option<FormFields> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(%error, key, "could not read draft");
            return None;
        }
    };
    match serde_json::from_str::<FormFields>(&raw) {
        Ok(fields) => Some(fields),
        Err(error) => {
            tracing::debug!(%error, key, "ignoring malformed draft");
            None
        }
    }
}

/// Persists `fields` under `key`.
pub fn save_draft(store: &dyn KeyValueStore, key: &str, fields: &FormFields) {
    let result = serde_json::to_string(fields)
        .map_err(StorageError::from)
        .and_then(|json| store.set(key, &json));
    if let Err(error) = result {
        tracing::warn!(%error, key, "could not save draft");
    }
}

/// Deletes the draft stored under `key`.
pub fn delete_draft(store: &dyn KeyValueStore, key: &str) {
    if let Err(error) = store.remove(key) {
        tracing::warn!(%error, key, "could not delete draft");
    }
}
