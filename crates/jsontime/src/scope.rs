//! The config that field helpers see on the current thread.
//!
//! Serde gives `with`-modules no context parameter, so the active
//! [`TimeConfig`] travels in a thread-local stack. [`TimeConfig::scoped`] pushes
//! onto it; outside any scope the built-in default applies.

use crate::config::TimeConfig;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::LazyLock;
use tracing::trace;

static BUILTIN: LazyLock<TimeConfig> = LazyLock::new(TimeConfig::new);

thread_local! {
    static ACTIVE: RefCell<Vec<TimeConfig>> = const { RefCell::new(Vec::new()) };
}

/// Pops the scope it was created for. Tied to the thread that pushed it.
#[derive(Debug)]
pub(crate) struct ScopeGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ACTIVE.with_borrow_mut(|stack| {
            stack.pop();
        });
    }
}

pub(crate) fn enter(config: &TimeConfig) -> ScopeGuard {
    ACTIVE.with_borrow_mut(|stack| {
        stack.push(config.clone());
        trace!(depth = stack.len(), "Entered time config scope");
    });
    ScopeGuard { _not_send: PhantomData }
}

/// Runs `f` against the innermost active config, or the built-in one.
///
/// The handle is cloned out of the stack first so `f` may enter nested scopes.
pub(crate) fn with_active<R>(f: impl FnOnce(&TimeConfig) -> R) -> R {
    let active = ACTIVE.with_borrow(|stack| stack.last().cloned());
    match active {
        Some(config) => f(&config),
        None => f(&BUILTIN),
    }
}
