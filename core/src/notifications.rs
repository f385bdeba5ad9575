//! Toast notifications for errors that are not tied to a single field.
//!
//! Each notification becomes a toast that dismisses itself after a fixed
//! period, or earlier when closed explicitly.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use formgate_types::{Severity, TaskId, ToastId};

use crate::host::NotificationSink;
use crate::timing::Timers;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug)]
struct Inner {
    dismiss_after: Duration,
    next_id: u64,
    visible: Vec<(Toast, TaskId)>,
    timers: Timers<ToastId>,
    delivered: usize,
}

/// Shared handle to the page's toast stack.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Rc<RefCell<Inner>>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                dismiss_after,
                next_id: 0,
                visible: Vec::new(),
                timers: Timers::new(),
                delivered: 0,
            })),
        }
    }

    /// Show a toast and arm its auto-dismiss timer.
    pub fn push(&self, message: &str, severity: Severity) -> ToastId {
        let mut inner = self.inner.borrow_mut();
        let id = ToastId::new(inner.next_id);
        inner.next_id += 1;
        let delay = inner.dismiss_after;
        let timer = inner.timers.schedule(delay, id);
        inner.visible.push((
            Toast {
                id,
                message: message.to_string(),
                severity,
            },
            timer,
        ));
        inner.delivered += 1;
        id
    }

    /// Close a toast before its timer runs out.
    pub fn close(&self, id: ToastId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(pos) = inner.visible.iter().position(|(toast, _)| toast.id == id) else {
            return false;
        };
        let (_, timer) = inner.visible.remove(pos);
        inner.timers.cancel(timer);
        true
    }

    /// Advance the dismiss clock. Returns how many toasts expired.
    pub fn advance(&self, delta: Duration) -> usize {
        let mut inner = self.inner.borrow_mut();
        let expired = inner.timers.advance(delta);
        inner
            .visible
            .retain(|(toast, _)| !expired.contains(&toast.id));
        if !expired.is_empty() {
            debug!(count = expired.len(), "toasts dismissed");
        }
        expired.len()
    }

    /// Toasts currently on screen, oldest first.
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        self.inner
            .borrow()
            .visible
            .iter()
            .map(|(toast, _)| toast.clone())
            .collect()
    }

    /// Total toasts ever shown, including dismissed ones.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.inner.borrow().delivered
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.push(message, severity);
    }
}
