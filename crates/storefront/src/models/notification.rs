//! Transient, auto-dismissing notification banner.

use std::time::Duration;

use tokio::time::Instant;

/// Banner styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message shown until its dismiss delay elapses.
///
/// Only the latest notification is kept; a new one replaces the old one and
/// restarts the delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

impl Notification {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    /// Whether the banner is still visible at `now`.
    #[must_use]
    pub fn is_visible(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) < ttl
    }

    /// Time left before the banner is dismissed.
    #[must_use]
    pub fn remaining(&self, now: Instant, ttl: Duration) -> Duration {
        ttl.saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
