//! Panic capture for test bodies

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic;
use std::sync::Once;

thread_local! {
    static LAST_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
    static IN_CASE: Cell<bool> = const { Cell::new(false) };
}

static INSTALL: Once = Once::new();

/// Silence the panic printer while a test body runs.
///
/// Without it, panicking test cases write `thread '..' panicked at ..` to
/// stderr as they happen, which interleaves with parallel runs. With it, the
/// location ends up in the `Errored` fault instead. Panics raised outside a
/// test body still go to the hook that was installed before. Installed at
/// most once per process.
pub fn install_quiet_panic_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_CASE.with(Cell::get) {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            LAST_LOCATION.with(|slot| *slot.borrow_mut() = location);
        }));
    });
}

/// Marks the current thread as running a test body until dropped.
pub(crate) struct CaseGuard {
    outer: bool,
}

impl CaseGuard {
    pub(crate) fn enter() -> Self {
        LAST_LOCATION.with(|slot| slot.borrow_mut().take());
        Self {
            outer: IN_CASE.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for CaseGuard {
    fn drop(&mut self) {
        IN_CASE.with(|flag| flag.set(self.outer));
    }
}

/// Turn a caught panic payload into a fault description.
pub(crate) fn describe(payload: Box<dyn Any + Send>) -> String {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    };

    match LAST_LOCATION.with(|slot| slot.borrow_mut().take()) {
        Some(location) => format!("panicked at {}: {}", location, message),
        None => format!("panicked: {}", message),
    }
}
