//! # i18n
//!
//! gettext-based translations for bot replies.
//!
//! - [`Catalog`]: a parsed `.mo` file with plural forms and message contexts.
//! - [`I18n`]: all compiled locales of one domain, the task-scoped current locale, and the
//!   current-instance context used by the free functions ([`gettext`], [`ngettext`], ...).
//! - [`LazyText`]: translation deferred until display.

mod catalog;
mod context;
mod error;
mod lazy;
mod plural;
mod translator;

pub use catalog::Catalog;
pub use context::{get_i18n, gettext, gettext_in, lazy_gettext, lazy_ngettext, ngettext, pgettext};
pub use error::{I18nError, Result};
pub use lazy::LazyText;
pub use plural::PluralRule;
pub use translator::I18n;
