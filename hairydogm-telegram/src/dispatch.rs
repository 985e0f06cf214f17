//! Glue between [`CallbackQueryFilter`] and teloxide's dptree handler trees.

use callback_data::{CallbackData, CallbackQueryFilter};
use hairydogm_core::ToCoreCallbackQuery;
use tracing::debug;

use crate::adapters::TelegramCallbackQueryWrapper;

/// Turns `filter` into a closure for `dptree::filter_map`: the branch runs only for callback
/// queries whose data unpacks into `T` (and passes the filter's rule), with the decoded `T`
/// injected into the handler.
///
/// ```ignore
/// Update::filter_callback_query()
///     .branch(dptree::filter_map(callback_filter(Pick::filter())).endpoint(on_pick))
/// ```
pub fn callback_filter<T>(
    filter: CallbackQueryFilter<T>,
) -> impl Fn(teloxide::types::CallbackQuery) -> Option<T> + Clone + Send + Sync + 'static
where
    T: CallbackData + Send + Sync + 'static,
{
    move |query: teloxide::types::CallbackQuery| {
        let core = TelegramCallbackQueryWrapper(&query).to_core();
        let matched = filter.check(&core);
        if matched.is_some() {
            debug!(query_id = %core.id, filter = %filter, "callback query matched");
        }
        matched
    }
}
