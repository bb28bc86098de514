//! Pending work the runtime picks up on each pump: inserted elements,
//! storage changes from other windows and the deferred initial pass.

use crate::applier::ApplyReport;
use crate::document::NodeId;
use crate::events::SyncSource;
use crate::storage::{BroadcastEnvelope, StorageEvent};
use crossbeam_channel::Receiver;
use kiosk_i18n_core::Language;
use std::time::Instant;

/// What one pump did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PumpReport {
    /// Inserted elements translated as their own scope.
    pub inserted: usize,
    /// Language changes taken over from other windows.
    pub synced: usize,
    /// Whether the deferred full pass ran.
    pub deferred_pass: bool,
    /// Everything the passes of this pump wrote, summed.
    pub applied: ApplyReport,
}

impl PumpReport {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug)]
pub(crate) struct Watcher {
    insertions: Option<Receiver<NodeId>>,
    storage: Option<Receiver<StorageEvent>>,
    deferred_pass_at: Option<Instant>,
}

impl Watcher {
    pub(crate) fn new(
        insertions: Option<Receiver<NodeId>>,
        storage: Option<Receiver<StorageEvent>>,
        deferred_pass_at: Instant,
    ) -> Self {
        Self {
            insertions,
            storage,
            deferred_pass_at: Some(deferred_pass_at),
        }
    }

    pub(crate) fn drain_insertions(&self) -> Vec<NodeId> {
        self.insertions
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default()
    }

    pub(crate) fn drain_storage(&self) -> Vec<StorageEvent> {
        self.storage
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default()
    }

    /// True once, the first time `now` reaches the deferred deadline.
    pub(crate) fn take_deferred_pass(&mut self, now: Instant) -> bool {
        match self.deferred_pass_at {
            Some(deadline) if now >= deadline => {
                self.deferred_pass_at = None;
                true
            },
            _ => false,
        }
    }
}

/// Reads a language change out of another window's storage write.
///
/// The language key carries a bare code; the broadcast key carries a
/// [`BroadcastEnvelope`]. Anything unrecognized yields `None`.
pub(crate) fn incoming_language(
    event: &StorageEvent,
    language_key: &str,
    broadcast_key: &str,
) -> Option<(Language, SyncSource)> {
    let value = event.new_value.as_deref()?;

    if event.key == language_key {
        return Language::parse(value).map(|lang| (lang, SyncSource::Storage));
    }

    if event.key == broadcast_key {
        return BroadcastEnvelope::parse(value)?
            .language()
            .map(|lang| (lang, SyncSource::Broadcast));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn event(key: &str, value: &str) -> StorageEvent {
        StorageEvent {
            key: key.to_string(),
            old_value: None,
            new_value: Some(value.to_string()),
        }
    }

    #[test]
    fn recognizes_language_and_broadcast_keys() {
        let incoming = |e: &StorageEvent| incoming_language(e, "selectedLanguage", "i18n_broadcast");

        assert_eq!(
            incoming(&event("selectedLanguage", "EN")),
            Some((Language::En, SyncSource::Storage))
        );
        assert_eq!(
            incoming(&event("i18n_broadcast", r#"{"t": 1700000000000, "lang": "ru"}"#)),
            Some((Language::Ru, SyncSource::Broadcast))
        );
        assert_eq!(incoming(&event("selectedLanguage", "de")), None);
        assert_eq!(incoming(&event("i18n_broadcast", "{}")), None);
        assert_eq!(incoming(&event("other", "ru")), None);
    }

    #[test]
    fn deferred_pass_fires_once_after_deadline() {
        let start = Instant::now();
        let mut watcher = Watcher::new(None, None, start + Duration::from_millis(50));

        assert!(!watcher.take_deferred_pass(start));
        assert!(watcher.take_deferred_pass(start + Duration::from_millis(50)));
        assert!(!watcher.take_deferred_pass(start + Duration::from_secs(1)));
    }
}
