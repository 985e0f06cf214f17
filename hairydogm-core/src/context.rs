//! Task-scoped "current instance" registry.
//!
//! A type implementing [`ContextInstance`] owns one tokio task-local slot. Code running inside
//! [`ContextInstance::scope`] (or [`ContextInstance::sync_scope`]) can fetch the instance with
//! [`ContextInstance::get_current`] without threading it through every call. The previous value
//! is restored when the scope ends, so nested scopes behave like a stack.
//!
//! Use [`impl_context_instance!`](crate::impl_context_instance) to declare the slot and the impl.

use std::future::Future;
use std::sync::Arc;

use tokio::task::futures::TaskLocalFuture;
use tokio::task::LocalKey;

use crate::error::{DogmError, Result};

pub trait ContextInstance: Send + Sync + Sized + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// The task-local slot holding the current instance.
    fn slot() -> &'static LocalKey<Arc<Self>>;

    /// Returns the current instance, or `None` outside of any scope.
    fn get_current() -> Option<Arc<Self>> {
        Self::slot().try_with(Arc::clone).ok()
    }

    /// Returns the current instance or [`DogmError::ContextNotSet`].
    fn try_current() -> Result<Arc<Self>> {
        Self::get_current().ok_or(DogmError::ContextNotSet(Self::NAME))
    }

    /// Runs `fut` with `instance` as the current instance.
    fn scope<F: Future>(instance: Arc<Self>, fut: F) -> TaskLocalFuture<Arc<Self>, F> {
        Self::slot().scope(instance, fut)
    }

    /// Synchronous variant of [`ContextInstance::scope`].
    fn sync_scope<F, R>(instance: Arc<Self>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        Self::slot().sync_scope(instance, f)
    }
}

/// Declares the task-local slot for a type and implements [`ContextInstance`] for it.
///
/// ```ignore
/// hairydogm_core::impl_context_instance!(I18n);
/// ```
#[macro_export]
macro_rules! impl_context_instance {
    ($ty:ident) => {
        impl $crate::context::ContextInstance for $ty {
            const NAME: &'static str = stringify!($ty);

            fn slot() -> &'static $crate::__tokio::task::LocalKey<::std::sync::Arc<$ty>> {
                // One slot per impl, scoped to this function.
                $crate::__tokio::task_local! {
                    static CURRENT_INSTANCE: ::std::sync::Arc<$ty>;
                }
                &CURRENT_INSTANCE
            }
        }
    };
}
