//! Key/value storage shared by every window of the application.
//!
//! Writes made through one window's handle are announced to the other
//! windows' subscribers, never to the writer itself, and only when the stored
//! value actually changed.

use crate::error::StorageError;
use crossbeam_channel::{Receiver, Sender, unbounded};
use kiosk_i18n_core::Language;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A change made by another window.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Receives changes made by other windows from now on.
    fn subscribe(&self) -> Result<Receiver<StorageEvent>, StorageError>;
}

/// Identifies one window connected to a [`SharedStorage`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WindowId(u64);

#[derive(Debug, Default)]
struct Shared {
    entries: HashMap<String, String>,
    listeners: Vec<(WindowId, Sender<StorageEvent>)>,
    next_window: u64,
    disabled: bool,
}

/// In-memory storage shared between windows, possibly on different threads.
#[derive(Clone, Debug, Default)]
pub struct SharedStorage {
    inner: Arc<Mutex<Shared>>,
}

impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage on which every operation fails with
    /// [`StorageError::Unavailable`].
    pub fn disabled() -> Self {
        let storage = Self::default();
        storage.set_disabled(true);
        storage
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.lock().disabled = disabled;
    }

    /// Connects a new window.
    pub fn handle(&self) -> StorageHandle {
        let mut shared = self.inner.lock();
        let id = WindowId(shared.next_window);
        shared.next_window += 1;
        StorageHandle {
            id,
            inner: Arc::clone(&self.inner),
        }
    }

    /// Reads a value directly, bypassing the availability switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }
}

/// One window's view of a [`SharedStorage`].
#[derive(Clone, Debug)]
pub struct StorageHandle {
    id: WindowId,
    inner: Arc<Mutex<Shared>>,
}

impl StorageHandle {
    pub fn window(&self) -> WindowId {
        self.id
    }
}

impl Storage for StorageHandle {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let shared = self.inner.lock();
        if shared.disabled {
            return Err(StorageError::Unavailable);
        }
        Ok(shared.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut shared = self.inner.lock();
        if shared.disabled {
            return Err(StorageError::Unavailable);
        }

        let old_value = shared.entries.insert(key.to_string(), value.to_string());
        if old_value.as_deref() == Some(value) {
            return Ok(());
        }

        let event = StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        };
        let writer = self.id;
        shared
            .listeners
            .retain(|(window, tx)| *window == writer || tx.send(event.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Result<Receiver<StorageEvent>, StorageError> {
        let mut shared = self.inner.lock();
        if shared.disabled {
            return Err(StorageError::Unavailable);
        }
        let (tx, rx) = unbounded();
        shared.listeners.push((self.id, tx));
        Ok(rx)
    }
}

/// The record written to the broadcast key to wake other windows.
///
/// `t` (Unix milliseconds) makes consecutive broadcasts of the same
/// language distinct values, so they still produce a change notification.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BroadcastEnvelope {
    pub t: i64,
    pub lang: String,
}

impl BroadcastEnvelope {
    pub fn new(lang: Language) -> Self {
        Self {
            t: jiff::Timestamp::now().as_millisecond(),
            lang: lang.code().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored envelope, `None` if it is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                tracing::debug!("Ignoring malformed broadcast '{}': {}", raw, err);
                None
            },
        }
    }

    /// The announced language, if it is a supported one.
    pub fn language(&self) -> Option<Language> {
        Language::parse(&self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_other_windows_only() {
        let storage = SharedStorage::new();
        let a = storage.handle();
        let b = storage.handle();
        let rx_a = a.subscribe().unwrap();
        let rx_b = b.subscribe().unwrap();

        a.set("selectedLanguage", "ru").unwrap();

        assert!(rx_a.try_recv().is_err());
        assert_eq!(
            rx_b.try_recv().unwrap(),
            StorageEvent {
                key: "selectedLanguage".to_string(),
                old_value: None,
                new_value: Some("ru".to_string()),
            }
        );
        assert_eq!(b.get("selectedLanguage").unwrap().as_deref(), Some("ru"));
    }

    #[test]
    fn unchanged_value_is_silent() {
        let storage = SharedStorage::new();
        let a = storage.handle();
        let b = storage.handle();
        a.set("selectedLanguage", "en").unwrap();
        let rx_b = b.subscribe().unwrap();

        a.set("selectedLanguage", "en").unwrap();

        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let storage = SharedStorage::new();
        let a = storage.handle();
        let b = storage.handle();
        drop(b.subscribe().unwrap());

        a.set("k", "v").unwrap();

        assert!(storage.inner.lock().listeners.is_empty());
    }

    #[test]
    fn disabled_storage_fails_every_call() {
        let storage = SharedStorage::disabled();
        let handle = storage.handle();

        assert!(matches!(handle.get("k"), Err(StorageError::Unavailable)));
        assert!(matches!(handle.set("k", "v"), Err(StorageError::Unavailable)));
        assert!(matches!(handle.subscribe(), Err(StorageError::Unavailable)));
        assert_eq!(storage.peek("k"), None);
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = BroadcastEnvelope::new(Language::Ru);
        let raw = envelope.to_json().unwrap();

        assert!(raw.contains(r#""lang":"ru""#));
        assert_eq!(BroadcastEnvelope::parse(&raw), Some(envelope));
    }

    #[test]
    fn malformed_envelopes_are_rejected() {
        assert_eq!(BroadcastEnvelope::parse("not json"), None);
        assert_eq!(BroadcastEnvelope::parse(r#"{"lang":"ru"}"#), None);

        let unknown = BroadcastEnvelope::parse(r#"{"t":1,"lang":"de"}"#).unwrap();
        assert_eq!(unknown.language(), None);
    }
}
