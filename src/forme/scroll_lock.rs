//! Page-level scroll and touch suppression while an override plays.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// The page an override locks. Implemented by the rendering layer.
pub trait PageSurface: Send + Sync {
    /// Current overflow behavior of the page body.
    fn overflow(&self) -> String;
    /// Replace the overflow behavior of the page body.
    fn set_overflow(&self, overflow: &str);
    /// Swallow (or stop swallowing) wheel and touch-move input.
    fn set_scroll_input_suppressed(&self, suppressed: bool);
    /// Show (or hide) the transparent overlay that intercepts clicks.
    fn set_click_overlay(&self, visible: bool);
}

/// In-memory page used when no real renderer is attached.
#[derive(Debug)]
pub struct HeadlessPage {
    state: Mutex<HeadlessPageState>,
}

/// Observable state of a [`HeadlessPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessPageState {
    /// Overflow value of the body.
    pub overflow: String,
    /// Whether wheel/touch-move input is swallowed.
    pub scroll_input_suppressed: bool,
    /// Whether the click overlay is shown.
    pub click_overlay: bool,
}

impl HeadlessPage {
    /// Page with the given initial body overflow.
    pub fn with_overflow(overflow: &str) -> Self {
        Self {
            state: Mutex::new(HeadlessPageState {
                overflow: overflow.to_string(),
                scroll_input_suppressed: false,
                click_overlay: false,
            }),
        }
    }

    /// Copy of the current page state.
    pub fn state(&self) -> HeadlessPageState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessPageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::with_overflow("auto")
    }
}

impl PageSurface for HeadlessPage {
    fn overflow(&self) -> String {
        self.lock().overflow.clone()
    }

    fn set_overflow(&self, overflow: &str) {
        self.lock().overflow = overflow.to_string();
    }

    fn set_scroll_input_suppressed(&self, suppressed: bool) {
        self.lock().scroll_input_suppressed = suppressed;
    }

    fn set_click_overlay(&self, visible: bool) {
        self.lock().click_overlay = visible;
    }
}

struct LockState {
    holders: usize,
    prior_overflow: Option<String>,
}

/// Reference-counted lock over a [`PageSurface`].
///
/// The first guard saves the page's overflow and suspends scrolling; the last
/// guard to drop restores it. Overlapping overrides therefore restore the
/// prior behavior exactly once.
#[derive(Clone)]
pub struct ScrollLock {
    surface: Arc<dyn PageSurface>,
    state: Arc<Mutex<LockState>>,
}

impl ScrollLock {
    /// Create a lock over `surface`.
    pub fn new(surface: Arc<dyn PageSurface>) -> Self {
        Self {
            surface,
            state: Arc::new(Mutex::new(LockState {
                holders: 0,
                prior_overflow: None,
            })),
        }
    }

    /// Suspend scrolling until the returned guard drops.
    pub fn acquire(&self) -> ScrollLockGuard {
        let mut state = self.lock_state();
        if state.holders == 0 {
            state.prior_overflow = Some(self.surface.overflow());
            self.surface.set_overflow("hidden");
            self.surface.set_scroll_input_suppressed(true);
            self.surface.set_click_overlay(true);
            debug!("page scroll locked");
        }
        state.holders += 1;

        ScrollLockGuard { lock: self.clone() }
    }

    /// Whether at least one guard is alive.
    pub fn is_active(&self) -> bool {
        self.lock_state().holders > 0
    }

    fn release(&self) {
        let mut state = self.lock_state();
        state.holders = state.holders.saturating_sub(1);
        if state.holders == 0 {
            let prior = state.prior_overflow.take().unwrap_or_default();
            self.surface.set_overflow(&prior);
            self.surface.set_scroll_input_suppressed(false);
            self.surface.set_click_overlay(false);
            debug!(overflow = %prior, "page scroll restored");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, LockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps the page locked while alive.
pub struct ScrollLockGuard {
    lock: ScrollLock,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_prior_overflow() {
        let page = Arc::new(HeadlessPage::with_overflow("scroll"));
        let lock = ScrollLock::new(page.clone());

        let guard = lock.acquire();
        assert!(lock.is_active());
        assert_eq!(
            page.state(),
            HeadlessPageState {
                overflow: "hidden".into(),
                scroll_input_suppressed: true,
                click_overlay: true,
            }
        );

        drop(guard);
        assert!(!lock.is_active());
        assert_eq!(
            page.state(),
            HeadlessPageState {
                overflow: "scroll".into(),
                scroll_input_suppressed: false,
                click_overlay: false,
            }
        );
    }

    #[test]
    fn overlapping_guards_restore_once_at_the_end() {
        let page = Arc::new(HeadlessPage::default());
        let lock = ScrollLock::new(page.clone());

        let first = lock.acquire();
        let second = lock.acquire();
        drop(first);
        assert_eq!(page.state().overflow, "hidden");
        assert!(page.state().click_overlay);

        drop(second);
        assert_eq!(page.state().overflow, "auto");
        assert!(!page.state().scroll_input_suppressed);
    }
}
