//! Transient notification shown on the status line: a short appear
//! delay, a fixed visible window, then a fade-out, driven by the render
//! loop polling [`Toast::phase_at`] rather than by timers.

use std::time::{Duration, Instant};

pub const TOAST_APPEAR_DELAY: Duration = Duration::from_millis(50);
pub const TOAST_VISIBLE_FOR: Duration = Duration::from_millis(2000);
pub const TOAST_FADE_FOR: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Toast {
    text: String,
    shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Within the appear delay; nothing is drawn yet.
    Pending,
    Visible,
    Fading,
}

impl Toast {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `None` once the toast has run its course and should be dropped.
    pub fn phase_at(&self, now: Instant) -> Option<ToastPhase> {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < TOAST_APPEAR_DELAY {
            Some(ToastPhase::Pending)
        } else if elapsed < TOAST_APPEAR_DELAY + TOAST_VISIBLE_FOR {
            Some(ToastPhase::Visible)
        } else if elapsed < TOAST_APPEAR_DELAY + TOAST_VISIBLE_FOR + TOAST_FADE_FOR {
            Some(ToastPhase::Fading)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_with_time() {
        let toast = Toast::new("Code is copied on clipboard");
        let start = toast.shown_at;

        assert_eq!(toast.phase_at(start), Some(ToastPhase::Pending));
        assert_eq!(
            toast.phase_at(start + Duration::from_millis(49)),
            Some(ToastPhase::Pending)
        );
        assert_eq!(
            toast.phase_at(start + Duration::from_millis(51)),
            Some(ToastPhase::Visible)
        );
        assert_eq!(
            toast.phase_at(start + Duration::from_millis(2049)),
            Some(ToastPhase::Visible)
        );
        assert_eq!(
            toast.phase_at(start + Duration::from_millis(2100)),
            Some(ToastPhase::Fading)
        );
        assert_eq!(toast.phase_at(start + Duration::from_millis(2551)), None);
    }

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(Toast::new("Renamed").text(), "Renamed");
    }
}
