//! # callback-data
//!
//! Typed callback data for inline keyboard buttons. A `#[derive(Serialize, Deserialize)]` struct
//! implementing [`CallbackData`] packs into `prefix:value:value...` (at most 64 bytes, the
//! Telegram limit) and unpacks back. [`CallbackQueryFilter`] matches incoming callback queries.

mod de;
mod error;
mod filter;
mod ser;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use error::{CallbackDataError, Result};
pub use filter::CallbackQueryFilter;

/// Maximum size of packed callback data in bytes.
pub const MAX_CALLBACK_LENGTH: usize = 64;

/// Default separator between prefix and values.
pub const DEFAULT_SEPARATOR: &str = ":";

/// Callback data wrapper.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Vote { poll: u32, option: Option<String> }
///
/// impl CallbackData for Vote {
///     const PREFIX: &'static str = "vote";
/// }
///
/// let packed = Vote { poll: 1, option: None }.pack()?; // "vote:1:"
/// ```
pub trait CallbackData: Serialize + DeserializeOwned {
    const PREFIX: &'static str;
    const SEPARATOR: &'static str = DEFAULT_SEPARATOR;

    /// Generates the callback data string.
    fn pack(&self) -> Result<String> {
        validate_prefix(Self::PREFIX, Self::SEPARATOR)?;

        let mut parts = vec![Self::PREFIX.to_string()];
        for (key, encoded) in ser::to_parts(self)? {
            if encoded.contains(Self::SEPARATOR) {
                return Err(CallbackDataError::SeparatorInValue {
                    separator: Self::SEPARATOR,
                    key,
                    value: encoded,
                });
            }
            parts.push(encoded);
        }

        let data = parts.join(Self::SEPARATOR);
        if data.len() > MAX_CALLBACK_LENGTH {
            return Err(CallbackDataError::TooLong { data });
        }
        Ok(data)
    }

    /// Parses a callback data string produced by [`CallbackData::pack`].
    fn unpack(value: &str) -> Result<Self> {
        validate_prefix(Self::PREFIX, Self::SEPARATOR)?;

        let mut parts = value.split(Self::SEPARATOR);
        let prefix = parts.next().unwrap_or_default();
        let values: Vec<&str> = parts.collect();

        de::from_parts::<Self, _>(&values, |expected, given| {
            if expected != given {
                return Err(CallbackDataError::ArgumentCount {
                    name: short_type_name::<Self>(),
                    expected,
                    given,
                });
            }
            if prefix != Self::PREFIX {
                return Err(CallbackDataError::BadPrefix {
                    got: prefix.to_string(),
                    expected: Self::PREFIX,
                });
            }
            Ok(())
        })
    }

    /// Builds a callback query filter for this type without a rule.
    fn filter() -> CallbackQueryFilter<Self>
    where
        Self: Send + Sync + 'static,
    {
        CallbackQueryFilter::new()
    }

    /// Builds a callback query filter that also requires `rule` to accept the decoded value.
    fn filter_with<F>(rule: F) -> CallbackQueryFilter<Self>
    where
        Self: Send + Sync + 'static,
        F: Fn(&Self) -> bool + Send + Sync + 'static,
    {
        CallbackQueryFilter::new().with_rule(rule)
    }
}

fn validate_prefix(prefix: &'static str, separator: &'static str) -> Result<()> {
    if prefix.is_empty() {
        return Err(CallbackDataError::EmptyPrefix);
    }
    if prefix.contains(separator) {
        return Err(CallbackDataError::SeparatorInPrefix { separator, prefix });
    }
    Ok(())
}

/// Last path segment of a type name (`my_bot::Vote` -> `Vote`).
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
