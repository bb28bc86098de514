#![doc = include_str!("../README.md")]

pub mod applier;
pub mod config;
pub mod directive;
pub mod document;
pub mod error;
pub mod events;
mod runtime;
pub mod state;
pub mod storage;
mod watcher;

pub use applier::{ApplyReport, ScopeApplier};
pub use config::{RuntimeConfig, load_dictionaries};
pub use document::{Document, MemoryDocument, NodeId};
pub use error::{I18nError, StorageError};
pub use events::{I18nEvent, SyncSource};
pub use runtime::I18n;
pub use state::{LanguageSource, LanguageState};
pub use storage::{BroadcastEnvelope, SharedStorage, Storage, StorageEvent, StorageHandle};
pub use watcher::PumpReport;

pub use kiosk_i18n_core::{
    DateStyle, Dictionaries, DictionaryStore, Language, NumberOptions, Variables, vars,
};

#[doc(hidden)]
pub use kiosk_i18n_core::__serde_json;
