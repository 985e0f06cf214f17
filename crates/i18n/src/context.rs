//! Translation helpers using the [`I18n`] of the current context.

use std::sync::Arc;

use hairydogm_core::ContextInstance;

use crate::translator::I18n;
use crate::error::{I18nError, Result};
use crate::lazy::LazyText;

/// The current [`I18n`]; fails outside of [`I18n::context`].
pub fn get_i18n() -> Result<Arc<I18n>> {
    I18n::get_current().ok_or(I18nError::ContextNotSet)
}

/// Translates `message` for the current locale.
pub fn gettext(message: &str) -> Result<String> {
    Ok(get_i18n()?.gettext(message, None, 1, None))
}

/// Plural-aware [`gettext`].
pub fn ngettext(singular: &str, plural: &str, n: u64) -> Result<String> {
    Ok(get_i18n()?.gettext(singular, Some(plural), n, None))
}

/// Like [`ngettext`] (or [`gettext`] without `plural`), but for `locale` instead of the current
/// locale when one is given.
pub fn gettext_in(
    locale: Option<&str>,
    singular: &str,
    plural: Option<&str>,
    n: u64,
) -> Result<String> {
    Ok(get_i18n()?.gettext(singular, plural, n, locale))
}

/// Translates `message` within a gettext context for the current locale.
pub fn pgettext(context: &str, message: &str) -> Result<String> {
    Ok(get_i18n()?.pgettext(context, message))
}

/// Deferred [`gettext`]: translated when displayed, with whatever context is current then.
pub fn lazy_gettext(message: impl Into<String>) -> LazyText {
    LazyText::new(message, None, 1)
}

/// Deferred [`ngettext`].
pub fn lazy_ngettext(singular: impl Into<String>, plural: impl Into<String>, n: u64) -> LazyText {
    LazyText::new(singular, Some(plural.into()), n)
}
