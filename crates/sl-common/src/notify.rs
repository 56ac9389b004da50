use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::debug;

/// Banner styles. Each has a fixed on-screen lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    /// Corner toast: 3s visible plus a 300ms slide-out.
    Toast,
    /// Short bottom banner after a candidate action.
    Feedback,
    /// Centered banner after the shortlist is sent.
    Success,
}

impl NotificationKind {
    pub fn lifetime(self) -> Duration {
        match self {
            NotificationKind::Toast => Duration::milliseconds(3_300),
            NotificationKind::Feedback => Duration::milliseconds(2_000),
            NotificationKind::Success => Duration::milliseconds(4_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.shown_at <= now && now < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            kind,
            message: message.into(),
            shown_at: now,
            expires_at: now + kind.lifetime(),
        };
        debug!(
            id = notification.id,
            kind = kind.as_ref(),
            message = %notification.message,
            "notification shown"
        );
        self.items.push(notification);
        self.next_id
    }

    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> + '_ {
        self.items.iter().filter(move |item| item.is_active(now))
    }

    /// Every notification shown so far that has not been pruned.
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    /// Drop expired notifications; returns how many went away.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| now < item.expires_at);
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
