//! Update filters.
//!
//! A [`Filter`] inspects an update and either rejects it (`None`) or yields data extracted from it,
//! which a router can pass on to the handler.

use std::fmt;

/// Predicate over an update of type `U` that can also extract data from it.
pub trait Filter<U>: fmt::Display + Send + Sync {
    type Output;

    /// Returns `Some(output)` when the update matches.
    fn check(&self, update: &U) -> Option<Self::Output>;
}

/// Renders a filter signature as `Name(arg1, arg2, key=value, ...)`.
/// Keyword arguments whose value is `None` are left out.
pub fn signature_to_string(name: &str, args: &[String], kwargs: &[(&str, Option<String>)]) -> String {
    let items: Vec<String> = args
        .iter()
        .cloned()
        .chain(
            kwargs
                .iter()
                .filter_map(|(k, v)| v.as_ref().map(|v| format!("{}={}", k, v))),
        )
        .collect();
    format!("{}({})", name, items.join(", "))
}
