//! Transient toast notifications.
//!
//! Toasts stack without coordination: there is no queue and no cap, so a
//! burst of calls shows a burst of toasts. Each toast runs its own two-step
//! timer: fully visible for the display period, then faded for the fade
//! period, then removed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::config::NotificationConfig;
use crate::sections::render_toast;

/// Toast identifier, unique per notification center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Toast styling, rendered as `alert-{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    /// Opacity dropped to zero; removal follows after the fade period.
    Fading,
}

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

struct Inner {
    toasts: watch::Sender<Vec<Toast>>,
    next_id: AtomicU64,
    display: Duration,
    fade: Duration,
}

/// Owner of the toast stack.
///
/// Cloning yields another handle to the same stack.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    pub fn new(config: &NotificationConfig) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                toasts,
                next_id: AtomicU64::new(1),
                display: config.display(),
                fade: config.fade(),
            }),
        }
    }

    /// Show a toast and schedule its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = ToastId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let message = message.into();
        tracing::debug!(toast = %id, kind = kind.as_str(), message = %message, "showing toast");

        self.inner.toasts.send_modify(|toasts| {
            toasts.push(Toast {
                id,
                message,
                kind,
                phase: ToastPhase::Visible,
            })
        });

        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(inner.display).await;
            inner.toasts.send_if_modified(|toasts| {
                match toasts.iter_mut().find(|t| t.id == id) {
                    Some(toast) => {
                        toast.phase = ToastPhase::Fading;
                        true
                    }
                    None => false,
                }
            });

            tokio::time::sleep(inner.fade).await;
            remove(&inner.toasts, id);
        });

        id
    }

    /// Close button: remove a toast immediately.
    ///
    /// Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        remove(&self.inner.toasts, id)
    }

    /// Snapshot of the current stack, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    /// Watch the stack for changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.toasts.subscribe()
    }

    /// Markup for every toast on screen.
    pub fn render(&self) -> String {
        self.inner.toasts.borrow().iter().map(render_toast).collect()
    }
}

fn remove(toasts: &watch::Sender<Vec<Toast>>, id: ToastId) -> bool {
    toasts.send_if_modified(|toasts| {
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    })
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("toasts", &self.inner.toasts.borrow().len())
            .field("display", &self.inner.display)
            .field("fade", &self.inner.fade)
            .finish()
    }
}
