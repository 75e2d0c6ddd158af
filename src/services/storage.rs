//! String preferences persisted in browser local storage.

use thiserror::Error;
use web_sys::Storage;

#[derive(Debug, Error)]
pub enum StorageError {
	#[error("local storage is unavailable")]
	Unavailable,
	#[error("write rejected: {0}")]
	Rejected(String),
}

/// Key/value persistence. Reads never fail; a missing store reads as empty.
pub trait PreferenceStore {
	fn get(&self, key: &str) -> Option<String>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`. Private browsing modes may deny access entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
	fn storage() -> Option<Storage> {
		web_sys::window()?.local_storage().ok()?
	}
}

impl PreferenceStore for LocalStorage {
	fn get(&self, key: &str) -> Option<String> {
		Self::storage()?.get_item(key).ok()?
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		Self::storage()
			.ok_or(StorageError::Unavailable)?
			.set_item(key, value)
			.map_err(|e| StorageError::Rejected(format!("{e:?}")))
	}
}
