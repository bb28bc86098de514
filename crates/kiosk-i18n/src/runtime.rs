use crate::applier::{ApplyReport, ScopeApplier};
use crate::config::RuntimeConfig;
use crate::directive;
use crate::document::{Document, NodeId};
use crate::events::{EventBus, I18nEvent, SyncSource};
use crate::state::LanguageState;
use crate::storage::{BroadcastEnvelope, Storage};
use crate::watcher::{PumpReport, Watcher, incoming_language};
use crossbeam_channel::Receiver;
use jiff::civil::Date;
use kiosk_i18n_core::{
    DateStyle, DictionaryStore, Formatter, Language, NumberOptions, Resolver, Variables,
};
use std::time::Instant;

#[derive(Debug)]
enum Phase {
    Uninitialized,
    Ready(Watcher),
}

/// The localization runtime of one window.
///
/// Owns the window's document and its handle to the shared storage. All
/// effects of a call have happened when it returns; work triggered from
/// outside (inserted elements, other windows, the deferred initial pass) is
/// picked up by [`pump`](Self::pump).
pub struct I18n<D, S> {
    document: D,
    storage: S,
    resolver: Resolver,
    config: RuntimeConfig,
    state: LanguageState,
    events: EventBus,
    phase: Phase,
}

impl<D, S> I18n<D, S>
where
    D: Document,
    S: Storage,
{
    pub fn new(document: D, storage: S, dictionaries: DictionaryStore, config: RuntimeConfig) -> Self {
        let state = LanguageState::new(
            config.fallback,
            config.runtime_locale.clone(),
            &config.language_key,
        );
        Self {
            document,
            storage,
            resolver: Resolver::new(dictionaries),
            config,
            state,
            events: EventBus::default(),
            phase: Phase::Uninitialized,
        }
    }

    /// Starts watching: subscribes to other windows' storage writes and, if
    /// configured, to inserted elements, marks the current language on the
    /// document and schedules the deferred full pass.
    ///
    /// Calling it again has no effect.
    pub fn init(&mut self) {
        self.init_at(Instant::now());
    }

    /// [`init`](Self::init) with an explicit clock reading.
    pub fn init_at(&mut self, now: Instant) {
        if self.is_ready() {
            tracing::warn!("I18n runtime is already initialized");
            return;
        }

        let storage = match self.storage.subscribe() {
            Ok(rx) => Some(rx),
            Err(err) => {
                tracing::debug!("Cross-window sync disabled: {}", err);
                None
            },
        };

        let lang = self.language();
        self.apply_side_effects(lang);

        let insertions = self
            .config
            .observe_mutations
            .then(|| self.document.subscribe_insertions());

        self.phase = Phase::Ready(Watcher::new(
            insertions,
            storage,
            now + self.config.initial_pass_delay,
        ));
        tracing::debug!("I18n runtime initialized in '{}'", lang);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// The current language. Has no side effects.
    pub fn language(&self) -> Language {
        self.state.resolve(&self.document, &self.storage)
    }

    /// Resolves `key` in the current language.
    pub fn translate(&self, key: &str, vars: &Variables, namespace: Option<&str>) -> String {
        self.resolver.resolve(self.language(), key, vars, namespace)
    }

    /// Switches to the language named by `code`, or to the fallback when the
    /// code is not recognized, and returns the language now in use.
    ///
    /// Always re-marks the document and re-applies every translation; the
    /// broadcast and the [`I18nEvent::LanguageChanged`] event only happen
    /// when the language actually changed.
    pub fn set_language(&mut self, code: &str) -> Language {
        let lang = Language::parse(code).unwrap_or_else(|| {
            tracing::debug!("Unknown language '{}', using '{}'", code, self.state.fallback());
            self.state.fallback()
        });
        let prev = self.language();
        let changed = prev != lang;

        self.state.set_cached(lang);
        if let Err(err) = self.storage.set(&self.config.language_key, lang.code()) {
            tracing::debug!("Cannot persist language '{}': {}", lang, err);
        }

        self.apply_side_effects(lang);

        if changed {
            self.broadcast(lang);
        }

        self.apply_translations();

        if changed {
            self.log_change(format_args!("Language changed: {} → {}", prev, lang));
            self.events.emit(I18nEvent::LanguageChanged {
                lang,
                prev: Some(prev),
                via: None,
            });
        }

        lang
    }

    /// Translates the whole document.
    pub fn apply_translations(&mut self) -> ApplyReport {
        let root = self.document.root();
        self.apply_to(root)
    }

    /// Translates the subtree of `scope`, `scope` included.
    pub fn apply_to(&mut self, scope: NodeId) -> ApplyReport {
        let lang = self.language();
        let dictionaries = self.resolver.store().snapshot();
        let report = ScopeApplier::new(&dictionaries, lang).apply(&mut self.document, scope);

        tracing::trace!("Applied {} translations in '{}'", report.total(), lang);
        self.events.emit(I18nEvent::Applied { lang });
        report
    }

    /// Handles a click on `target`: a click inside a language switch
    /// selects that switch's language.
    ///
    /// Clicks are ignored until [`init`](Self::init) has run.
    pub fn handle_click(&mut self, target: NodeId) -> Option<Language> {
        if !self.is_ready() {
            tracing::debug!("Ignoring click before init");
            return None;
        }
        let button = self.document.closest(target, directive::LANGUAGE_SWITCH)?;
        let code = self
            .document
            .attribute(button, directive::LANGUAGE_SWITCH)
            .unwrap_or_default()
            .to_lowercase();
        Some(self.set_language(&code))
    }

    /// Processes pending watcher work.
    pub fn pump(&mut self) -> PumpReport {
        self.pump_at(Instant::now())
    }

    /// [`pump`](Self::pump) with an explicit clock reading.
    ///
    /// Inserted elements are translated one by one as their own scope, then
    /// language changes from other windows are taken over, then the deferred
    /// full pass runs if `now` has reached its deadline.
    pub fn pump_at(&mut self, now: Instant) -> PumpReport {
        let mut report = PumpReport::default();

        let (inserted, changes, deferred) = match &mut self.phase {
            Phase::Uninitialized => return report,
            Phase::Ready(watcher) => (
                watcher.drain_insertions(),
                watcher.drain_storage(),
                watcher.take_deferred_pass(now),
            ),
        };

        for node in inserted {
            report.applied += self.apply_to(node);
            report.inserted += 1;
        }

        for change in changes {
            let Some((lang, via)) = incoming_language(
                &change,
                &self.config.language_key,
                &self.config.broadcast_key,
            ) else {
                continue;
            };
            report.applied += self.sync_from(lang, via);
            report.synced += 1;
        }

        if deferred {
            report.applied += self.apply_translations();
            report.deferred_pass = true;
        }

        report
    }

    /// Receives every event emitted from now on.
    pub fn subscribe(&mut self) -> Receiver<I18nEvent> {
        self.events.subscribe()
    }

    pub fn format_number(&self, value: f64, options: &NumberOptions) -> String {
        self.formatter().number(value, options)
    }

    /// Formats a currency amount; `None` uses the configured default currency.
    pub fn format_currency(&self, value: f64, currency: Option<&str>) -> String {
        let currency = currency.unwrap_or(&self.config.default_currency);
        self.formatter().currency(value, currency)
    }

    pub fn format_date(&self, date: Date, style: DateStyle) -> String {
        self.formatter().date(date, style)
    }

    /// Formats the UTC date of a Unix-millisecond timestamp.
    pub fn format_timestamp(&self, millis: i64, style: DateStyle) -> String {
        self.formatter().timestamp_millis(millis, style)
    }

    pub fn format_relative_time(&self, diff_seconds: f64) -> String {
        self.formatter().relative_time(diff_seconds)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access for the host's own edits. Insertions made here are
    /// seen by the next pump.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn dictionaries(&self) -> &DictionaryStore {
        self.resolver.store()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.language())
    }

    fn sync_from(&mut self, lang: Language, via: SyncSource) -> ApplyReport {
        self.state.set_cached(lang);
        self.apply_side_effects(lang);
        let applied = self.apply_translations();
        self.log_change(format_args!("Language sync via {}: {}", via, lang));
        self.events.emit(I18nEvent::LanguageChanged {
            lang,
            prev: None,
            via: Some(via),
        });
        applied
    }

    fn broadcast(&self, lang: Language) {
        let result = BroadcastEnvelope::new(lang)
            .to_json()
            .and_then(|raw| self.storage.set(&self.config.broadcast_key, &raw));
        if let Err(err) = result {
            tracing::debug!("Cannot broadcast language '{}': {}", lang, err);
        }
    }

    /// Marks `lang` on the root element and on the language switches.
    fn apply_side_effects(&mut self, lang: Language) {
        let root = self.document.root();
        self.document.set_attribute(root, "lang", lang.code());
        self.document
            .set_attribute(root, "dir", lang.direction().as_str());

        for button in self.document.query_all(root, directive::LANGUAGE_SWITCH) {
            let active = self
                .document
                .attribute(button, directive::LANGUAGE_SWITCH)
                .is_some_and(|code| code.eq_ignore_ascii_case(lang.code()));
            self.document.toggle_class(button, "active", active);
            self.document
                .set_attribute(button, "aria-pressed", if active { "true" } else { "false" });
        }
    }

    fn log_change(&self, message: std::fmt::Arguments<'_>) {
        if self.config.debug {
            tracing::info!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }
    }
}
