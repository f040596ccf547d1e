//! Cart badge counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// What `#cartBadge` shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeView {
    pub text: String,
    /// Scaled up briefly after each change.
    pub pulsing: bool,
}

impl BadgeView {
    /// CSS scale factor for the current state.
    pub fn scale(&self) -> f32 {
        if self.pulsing {
            1.3
        } else {
            1.0
        }
    }
}

struct Inner {
    view: watch::Sender<BadgeView>,
    pulse: Duration,
    generation: AtomicU64,
}

/// Handle to the cart badge.
#[derive(Clone)]
pub struct CartBadge {
    inner: Arc<Inner>,
}

impl CartBadge {
    /// Bind to a badge that currently shows `initial_text`.
    pub fn new(initial_text: impl Into<String>, pulse: Duration) -> Self {
        let (view, _) = watch::channel(BadgeView {
            text: initial_text.into(),
            pulsing: false,
        });
        Self {
            inner: Arc::new(Inner {
                view,
                pulse,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Show a new count and bump the badge.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_count(&self, count: i64) {
        self.inner.view.send_modify(|view| {
            view.text = count.to_string();
            view.pulsing = true;
        });

        // Only the most recent bump may shrink the badge back.
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(inner.pulse).await;
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.view.send_modify(|view| view.pulsing = false);
            }
        });
    }

    pub fn view(&self) -> BadgeView {
        self.inner.view.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.inner.view.borrow().text.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BadgeView> {
        self.inner.view.subscribe()
    }
}

impl std::fmt::Debug for CartBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartBadge")
            .field("view", &*self.inner.view.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_count_pulses_then_settles() {
        let badge = CartBadge::new("0", Duration::from_millis(200));
        assert_eq!(badge.view().scale(), 1.0);

        badge.set_count(5);
        settle().await;
        assert_eq!(badge.text(), "5");
        assert!(badge.view().pulsing);
        assert_eq!(badge.view().scale(), 1.3);

        advance(Duration::from_millis(200)).await;
        settle().await;
        assert!(!badge.view().pulsing);
        assert_eq!(badge.text(), "5");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_keep_latest_pulse() {
        let badge = CartBadge::new("1", Duration::from_millis(200));
        badge.set_count(2);
        settle().await;
        advance(Duration::from_millis(150)).await;
        badge.set_count(3);
        settle().await;

        // First timer fires here but the second bump is still running.
        advance(Duration::from_millis(50)).await;
        settle().await;
        assert!(badge.view().pulsing);

        advance(Duration::from_millis(150)).await;
        settle().await;
        assert!(!badge.view().pulsing);
        assert_eq!(badge.text(), "3");
    }
}
