//! # Notifications
//!
//! Transient banners. Each one lives on its own clock: visible for
//! [`VISIBLE_FOR`], fading for [`FADE_FOR`], then pruned. Banners stack;
//! there is no queue and no deduplication.

use std::time::{Duration, Instant};

pub const VISIBLE_FOR: Duration = Duration::from_secs(4);
pub const FADE_FOR: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Error => "✖",
            NotificationKind::Success => "✔",
            NotificationKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn phase(&self, now: Instant) -> Phase {
        let age = now.saturating_duration_since(self.created_at);
        if age < VISIBLE_FOR {
            Phase::Visible
        } else if age < VISIBLE_FOR + FADE_FOR {
            Phase::Fading
        } else {
            Phase::Expired
        }
    }
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.notify_at(message, kind, Instant::now())
    }

    pub fn notify_at(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Remove expired banners. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.phase(now) != Phase::Expired);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.items.iter().filter(|n| n.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_the_clock() {
        let start = Instant::now();
        let mut stack = Notifications::new();
        stack.notify_at("hello", NotificationKind::Info, start);
        let n = &stack.items()[0];

        assert_eq!(n.phase(start), Phase::Visible);
        assert_eq!(n.phase(start + Duration::from_millis(3999)), Phase::Visible);
        assert_eq!(n.phase(start + VISIBLE_FOR), Phase::Fading);
        assert_eq!(n.phase(start + VISIBLE_FOR + FADE_FOR), Phase::Expired);
    }

    #[test]
    fn banners_expire_independently() {
        let start = Instant::now();
        let mut stack = Notifications::new();
        stack.notify_at("first", NotificationKind::Error, start);
        stack.notify_at("second", NotificationKind::Success, start + Duration::from_secs(2));

        assert!(!stack.prune(start + Duration::from_secs(4)));
        assert_eq!(stack.len(), 2);

        assert!(stack.prune(start + Duration::from_millis(4600)));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.items()[0].message, "second");

        assert!(stack.prune(start + Duration::from_secs(7)));
        assert!(stack.is_empty());
    }

    #[test]
    fn duplicates_are_not_merged() {
        let mut stack = Notifications::new();
        stack.notify("same", NotificationKind::Error);
        stack.notify("same", NotificationKind::Error);
        assert_eq!(stack.count_of(NotificationKind::Error), 2);
    }
}
