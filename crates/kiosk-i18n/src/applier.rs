//! Walks a document scope and writes translations into it.

use crate::directive;
use crate::document::{Document, NodeId};
use kiosk_i18n_core::resolver::resolve_in;
use kiosk_i18n_core::{Dictionaries, Language};
use std::ops::AddAssign;

/// What a pass changed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ApplyReport {
    pub titles: usize,
    pub texts: usize,
    pub html: usize,
    pub attributes: usize,
}

impl ApplyReport {
    pub fn total(&self) -> usize {
        self.titles + self.texts + self.html + self.attributes
    }
}

impl AddAssign for ApplyReport {
    fn add_assign(&mut self, rhs: Self) {
        self.titles += rhs.titles;
        self.texts += rhs.texts;
        self.html += rhs.html;
        self.attributes += rhs.attributes;
    }
}

/// Applies one dictionary snapshot in one language.
pub struct ScopeApplier<'a> {
    dictionaries: &'a Dictionaries,
    lang: Language,
}

impl<'a> ScopeApplier<'a> {
    pub fn new(dictionaries: &'a Dictionaries, lang: Language) -> Self {
        Self { dictionaries, lang }
    }

    /// Translates every directive in the subtree of `scope`, `scope` included.
    pub fn apply<D: Document + ?Sized>(&self, doc: &mut D, scope: NodeId) -> ApplyReport {
        let mut report = ApplyReport::default();

        let translatable = doc.query_all(scope, directive::TRANSLATE);
        let (titles, texts): (Vec<NodeId>, Vec<NodeId>) = translatable
            .into_iter()
            .partition(|node| doc.tag_name(*node) == Some("title"));

        if let Some(&title) = titles.first()
            && let Some(text) = self.translate(doc, title, directive::TRANSLATE)
        {
            doc.set_text_content(title, &text);
            doc.set_title(&text);
            report.titles += 1;
        }

        for node in texts {
            if let Some(text) = self.translate(doc, node, directive::TRANSLATE) {
                doc.set_text_content(node, &text);
                report.texts += 1;
            }
        }

        for node in doc.query_all(scope, directive::TRANSLATE_HTML) {
            if let Some(html) = self.translate(doc, node, directive::TRANSLATE_HTML) {
                doc.set_inner_html(node, &html);
                report.html += 1;
            }
        }

        for node in doc.query_all(scope, directive::TRANSLATE_ATTR) {
            report.attributes += self.apply_attributes(doc, node);
        }

        report
    }

    fn translate<D: Document + ?Sized>(&self, doc: &D, node: NodeId, key_attr: &str) -> Option<String> {
        let key = doc.attribute(node, key_attr)?;
        let vars = directive::variables(doc, node);
        let ns = directive::namespace(doc, node);
        Some(resolve_in(self.dictionaries, self.lang, key, &vars, ns.as_deref()))
    }

    fn apply_attributes<D: Document + ?Sized>(&self, doc: &mut D, node: NodeId) -> usize {
        let attrs = directive::translated_attributes(doc, node);
        if attrs.is_empty() {
            return 0;
        }

        let vars = directive::variables(doc, node);
        let ns = directive::namespace(doc, node);

        let mut updated = 0;
        for attr in attrs {
            let Some(key) = directive::attribute_key(doc, node, &attr) else {
                continue;
            };
            let value = resolve_in(self.dictionaries, self.lang, &key, &vars, ns.as_deref());
            doc.set_attribute(node, &attr, &value);
            updated += 1;
        }
        updated
    }
}
