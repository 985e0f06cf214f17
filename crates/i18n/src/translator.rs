//! [`I18n`]: catalogs of every compiled locale under a directory, plus the task-scoped current locale.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use hairydogm_core::ContextInstance;
use tracing::{debug, info, instrument};

use crate::catalog::Catalog;
use crate::error::{I18nError, Result};
use crate::lazy::LazyText;

tokio::task_local! {
    static CURRENT_LOCALE: RefCell<Option<String>>;
}

/// Translations loaded from `<path>/<locale>/LC_MESSAGES/<domain>.mo`.
#[derive(Debug)]
pub struct I18n {
    path: PathBuf,
    default_locale: String,
    domain: String,
    locales: RwLock<BTreeMap<String, Arc<Catalog>>>,
}

hairydogm_core::impl_context_instance!(I18n);

impl I18n {
    /// Loads every compiled locale found under `path`.
    ///
    /// Fails with [`I18nError::NotCompiled`] when a locale only has a `.po` source.
    pub fn new(
        path: impl Into<PathBuf>,
        default_locale: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self> {
        let path = path.into();
        let domain = domain.into();
        let locales = find_locales(&path, &domain)?;
        info!(
            path = %path.display(),
            domain = %domain,
            locales = ?locales.keys().collect::<Vec<_>>(),
            "translations loaded"
        );
        Ok(Self {
            path,
            default_locale: default_locale.into(),
            domain,
            locales: RwLock::new(locales),
        })
    }

    /// Same as [`I18n::new`] with default locale `en` and domain `bot`.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(path, "en", "bot")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Re-reads the catalogs from disk. On error the previously loaded catalogs stay in place.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn reload(&self) -> Result<()> {
        let locales = find_locales(&self.path, &self.domain)?;
        *self.locales.write().unwrap_or_else(|e| e.into_inner()) = locales;
        Ok(())
    }

    /// Locales with a loaded catalog, sorted.
    pub fn available_locales(&self) -> Vec<String> {
        self.locales
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    /// Catalog of `locale`, if loaded.
    pub fn catalog(&self, locale: &str) -> Option<Arc<Catalog>> {
        self.locales
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(locale)
            .cloned()
    }

    /// Locale of the current scope, falling back to the default locale.
    pub fn current_locale(&self) -> String {
        CURRENT_LOCALE
            .try_with(|cell| cell.borrow().clone())
            .ok()
            .flatten()
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Sets the locale for the rest of the current scope ([`I18n::context`] or [`I18n::use_locale`]).
    pub fn set_current_locale(&self, locale: impl Into<String>) -> Result<()> {
        let locale = locale.into();
        CURRENT_LOCALE
            .try_with(|cell| *cell.borrow_mut() = Some(locale))
            .map_err(|_| I18nError::NoLocaleScope)
    }

    /// Runs `fut` with `locale` as the current locale; the previous locale is restored afterwards.
    pub async fn use_locale<F: Future>(&self, locale: impl Into<String>, fut: F) -> F::Output {
        CURRENT_LOCALE
            .scope(RefCell::new(Some(locale.into())), fut)
            .await
    }

    /// Runs `fut` with this instance as the current [`I18n`] (see [`crate::get_i18n`]).
    ///
    /// `fut` gets its own locale scope, seeded with the locale already in effect (if any), so
    /// [`I18n::set_current_locale`] inside does not leak out.
    pub async fn context<F: Future>(self: Arc<Self>, fut: F) -> F::Output {
        let inherited = CURRENT_LOCALE
            .try_with(|cell| cell.borrow().clone())
            .ok()
            .flatten();
        I18n::scope(self, CURRENT_LOCALE.scope(RefCell::new(inherited), fut)).await
    }

    /// Picks the best loaded locale for a client language tag such as `pt-BR`: exact match,
    /// then `pt_BR`, then the primary subtag `pt`, then the default locale.
    pub fn negotiate_locale(&self, language_code: Option<&str>) -> String {
        let Some(code) = language_code.map(str::trim).filter(|c| !c.is_empty()) else {
            return self.default_locale.clone();
        };
        let locales = self.locales.read().unwrap_or_else(|e| e.into_inner());
        let underscored = code.replace('-', "_");
        let primary = code
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();
        [code.to_string(), underscored, primary]
            .into_iter()
            .find(|candidate| locales.contains_key(candidate))
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Translates `singular` (or selects a plural form when `plural` is given) for `locale`,
    /// or the current locale when `locale` is `None`.
    ///
    /// Without a catalog for the locale the message is returned untranslated: `singular` when
    /// `n == 1`, otherwise `plural` (or `singular` when there is no plural).
    pub fn gettext(
        &self,
        singular: &str,
        plural: Option<&str>,
        n: u64,
        locale: Option<&str>,
    ) -> String {
        let locale = locale
            .map(str::to_string)
            .unwrap_or_else(|| self.current_locale());
        match self.catalog(&locale) {
            Some(catalog) => match plural {
                Some(plural) => catalog.ngettext(singular, plural, n).to_string(),
                None => catalog.gettext(singular).to_string(),
            },
            None => {
                debug!(locale = %locale, "no catalog for locale, message left untranslated");
                untranslated(singular, plural, n).to_string()
            }
        }
    }

    /// Translates `msgid` within `context` for the current locale.
    pub fn pgettext(&self, context: &str, msgid: &str) -> String {
        match self.catalog(&self.current_locale()) {
            Some(catalog) => catalog.pgettext(context, msgid).to_string(),
            None => msgid.to_string(),
        }
    }

    /// Plural-aware [`I18n::pgettext`].
    pub fn npgettext(&self, context: &str, singular: &str, plural: &str, n: u64) -> String {
        match self.catalog(&self.current_locale()) {
            Some(catalog) => catalog.npgettext(context, singular, plural, n).to_string(),
            None => untranslated(singular, Some(plural), n).to_string(),
        }
    }

    /// Deferred [`I18n::gettext`] bound to this instance; translated when displayed.
    pub fn lazy_gettext(
        self: &Arc<Self>,
        singular: impl Into<String>,
        plural: Option<String>,
        n: u64,
        locale: Option<String>,
    ) -> LazyText {
        LazyText::new(singular, plural, n)
            .with_locale(locale)
            .bound_to(Arc::clone(self))
    }
}

pub(crate) fn untranslated<'a>(singular: &'a str, plural: Option<&'a str>, n: u64) -> &'a str {
    if n == 1 {
        singular
    } else {
        plural.unwrap_or(singular)
    }
}

fn find_locales(path: &Path, domain: &str) -> Result<BTreeMap<String, Arc<Catalog>>> {
    let mut translations = BTreeMap::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let messages = entry.path().join("LC_MESSAGES");
        let mo_path = messages.join(format!("{domain}.mo"));

        if mo_path.exists() {
            let catalog = Catalog::open(&mo_path)?;
            debug!(locale = %name, entries = catalog.len(), "locale loaded");
            translations.insert(name, Arc::new(catalog));
        } else if messages.join(format!("{domain}.po")).exists() {
            return Err(I18nError::NotCompiled(name));
        }
    }

    Ok(translations)
}
