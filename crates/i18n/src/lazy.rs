//! Deferred translations.

use std::fmt;
use std::sync::Arc;

use hairydogm_core::ContextInstance;
use tracing::warn;

use crate::translator::{untranslated, I18n};
use crate::error::{I18nError, Result};

/// A message translated only when rendered, so it can be declared before the user's locale is
/// known (e.g. in a static menu definition) and still come out in that locale.
///
/// Rendering resolves against the bound [`I18n`] if any, otherwise the current context. Outside of
/// any context `Display` falls back to the untranslated text; [`LazyText::resolve`] reports the
/// error instead.
#[derive(Debug, Clone)]
pub struct LazyText {
    singular: String,
    plural: Option<String>,
    n: u64,
    locale: Option<String>,
    context: Option<String>,
    i18n: Option<Arc<I18n>>,
}

impl LazyText {
    pub fn new(singular: impl Into<String>, plural: Option<String>, n: u64) -> Self {
        Self {
            singular: singular.into(),
            plural,
            n,
            locale: None,
            context: None,
            i18n: None,
        }
    }

    /// Pins the locale instead of using the current one.
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    /// Looks the message up within a gettext context (`msgctxt`).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub(crate) fn bound_to(mut self, i18n: Arc<I18n>) -> Self {
        self.i18n = Some(i18n);
        self
    }

    /// Translates now.
    pub fn resolve(&self) -> Result<String> {
        let i18n = match &self.i18n {
            Some(i18n) => Arc::clone(i18n),
            None => I18n::get_current().ok_or(I18nError::ContextNotSet)?,
        };
        let text = match (&self.context, &self.locale) {
            (Some(context), None) => match &self.plural {
                Some(plural) => i18n.npgettext(context, &self.singular, plural, self.n),
                None => i18n.pgettext(context, &self.singular),
            },
            (Some(context), Some(locale)) => {
                let catalog = i18n.catalog(locale);
                match (&catalog, &self.plural) {
                    (Some(c), Some(plural)) => {
                        c.npgettext(context, &self.singular, plural, self.n).to_string()
                    }
                    (Some(c), None) => c.pgettext(context, &self.singular).to_string(),
                    (None, plural) => {
                        untranslated(&self.singular, plural.as_deref(), self.n).to_string()
                    }
                }
            }
            (None, locale) => i18n.gettext(
                &self.singular,
                self.plural.as_deref(),
                self.n,
                locale.as_deref(),
            ),
        };
        Ok(text)
    }
}

impl fmt::Display for LazyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolve() {
            Ok(text) => f.write_str(&text),
            Err(e) => {
                warn!(error = %e, msgid = %self.singular, "lazy text rendered untranslated");
                f.write_str(untranslated(&self.singular, self.plural.as_deref(), self.n))
            }
        }
    }
}

impl From<LazyText> for String {
    fn from(text: LazyText) -> Self {
        text.to_string()
    }
}
