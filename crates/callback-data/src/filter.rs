//! Filter matching callback queries whose data unpacks into a given [`CallbackData`] type.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use hairydogm_core::{signature_to_string, CallbackQuery, Filter};
use tracing::debug;

use crate::{short_type_name, CallbackData};

type Rule<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Matches callback queries carrying `T`, optionally narrowed by a rule over the decoded value.
///
/// Create it through [`CallbackData::filter`] or [`CallbackData::filter_with`].
pub struct CallbackQueryFilter<T> {
    rule: Option<Rule<T>>,
    rule_name: Option<String>,
    _data: PhantomData<fn() -> T>,
}

impl<T: CallbackData> CallbackQueryFilter<T> {
    pub(crate) fn new() -> Self {
        Self {
            rule: None,
            rule_name: None,
            _data: PhantomData,
        }
    }

    /// Adds a rule the decoded value must satisfy.
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rule = Some(Arc::new(rule));
        self
    }

    /// Names the rule in the filter's `Display` output.
    pub fn named(mut self, rule_name: impl Into<String>) -> Self {
        self.rule_name = Some(rule_name.into());
        self
    }

    /// Decodes the query's data; `None` when it is missing, does not unpack into `T`, or the rule rejects it.
    pub fn check(&self, query: &CallbackQuery) -> Option<T> {
        let data = query.data.as_deref().filter(|d| !d.is_empty())?;
        let callback_data = match T::unpack(data) {
            Ok(value) => value,
            Err(e) => {
                debug!(query_id = %query.id, error = %e, "callback data does not match");
                return None;
            }
        };
        match &self.rule {
            Some(rule) if !rule(&callback_data) => None,
            _ => Some(callback_data),
        }
    }
}

impl<T> Clone for CallbackQueryFilter<T> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            rule_name: self.rule_name.clone(),
            _data: PhantomData,
        }
    }
}

impl<T: CallbackData> fmt::Display for CallbackQueryFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self
            .rule
            .as_ref()
            .map(|_| self.rule_name.clone().unwrap_or_else(|| "<rule>".to_string()));
        f.write_str(&signature_to_string(
            "CallbackQueryFilter",
            &[],
            &[
                ("callback_data", Some(short_type_name::<T>().to_string())),
                ("rule", rule),
            ],
        ))
    }
}

impl<T: CallbackData> fmt::Debug for CallbackQueryFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: CallbackData + Send + Sync> Filter<CallbackQuery> for CallbackQueryFilter<T> {
    type Output = T;

    fn check(&self, update: &CallbackQuery) -> Option<T> {
        CallbackQueryFilter::check(self, update)
    }
}
