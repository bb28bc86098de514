use crossbeam_channel::{Receiver, Sender, unbounded};
use kiosk_i18n_core::Language;
use strum::{Display, IntoStaticStr};

/// Where a language change seen by this window came from.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum SyncSource {
    /// Another window wrote the language key.
    Storage,
    /// Another window wrote a broadcast envelope.
    Broadcast,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum I18nEvent {
    /// The language changed. `via` is `None` for changes made in this window;
    /// `prev` is only known for those.
    LanguageChanged {
        lang: Language,
        prev: Option<Language>,
        via: Option<SyncSource>,
    },
    /// A translation pass finished.
    Applied { lang: Language },
}

/// Fans events out to every live subscriber.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<I18nEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<I18nEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: I18nEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
