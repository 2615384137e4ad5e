//! Persisted preferences store.
//!
//! Every form field is mirrored into an injected key-value collaborator so
//! the screen comes back up exactly as it was left. The store is a trait so
//! tests run against [`MemoryStore`]; the CLI uses [`JsonFileStore`], a
//! single JSON document on disk. Single writer per key, last-write-wins —
//! no transactionality is needed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;

/// Preference keys, one per persisted field.
pub mod keys {
    /// Gr4vy merchant identifier (admin setting).
    pub const GR4VY_ID: &str = "gr4vy_id";
    /// API bearer token (admin setting).
    pub const API_TOKEN: &str = "api_token";
    /// Server environment raw value (admin setting).
    pub const SERVER_ENVIRONMENT: &str = "server_environment";
    /// Request timeout in seconds, as entered (admin setting).
    pub const TIMEOUT: &str = "timeout";

    /// Checkout session identifier.
    pub const CHECKOUT_SESSION_ID: &str = "fields.checkout_session_id";
    /// Payment method selector raw value.
    pub const PAYMENT_METHOD_TYPE: &str = "fields.payment_method_type";
    /// Card number.
    pub const CARD_NUMBER: &str = "fields.card_number";
    /// Card expiration date.
    pub const EXPIRATION_DATE: &str = "fields.expiration_date";
    /// Card security code.
    pub const SECURITY_CODE: &str = "fields.security_code";
    /// Stored payment method identifier.
    pub const PAYMENT_METHOD_ID: &str = "fields.payment_method_id";
    /// Security code for the stored payment method.
    pub const ID_SECURITY_CODE: &str = "fields.id_security_code";
    /// 3DS authenticate toggle.
    pub const AUTHENTICATE: &str = "fields.authenticate";
    /// Selected test card raw value.
    pub const TEST_CARD: &str = "fields.test_card";
    /// Selected theme raw value.
    pub const THEME: &str = "fields.theme";
    /// 3DS challenge timeout in minutes, as entered.
    pub const SDK_MAX_TIMEOUT: &str = "fields.sdk_max_timeout";
}

/// Errors raised by a preferences store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be (de)serialized.
    #[error("preferences serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Asynchronous key-value store for string and boolean preferences.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Reads a string value, `None` when the key was never written.
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a string value.
    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Reads a boolean value, `None` when the key was never written.
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError>;

    /// Writes a boolean value.
    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

/// In-memory store backed by a concurrent map. Used by tests and useful as
/// a throwaway store for one-shot invocations.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesStore for MemoryStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .get(key)
            .and_then(|v| v.as_str().map(str::to_owned)))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), Value::from(value));
        Ok(())
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.entries.get(key).and_then(|v| v.as_bool()))
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), Value::from(value));
        Ok(())
    }
}

/// File-backed store holding all preferences in one JSON document.
///
/// The whole document is rewritten on each set. Keys are kept sorted so
/// the file diffs cleanly.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, reading the existing document when there
    /// is one.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing file cannot be read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, entries: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_owned(), value);
        self.flush(&entries).await
    }
}

#[async_trait]
impl PreferencesStore for JsonFileStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).and_then(|v| v.as_str().map(str::to_owned)))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(key, Value::from(value)).await
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).and_then(Value::as_bool))
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(key, Value::from(value)).await
    }
}
