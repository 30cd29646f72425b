//! Transient on-screen notifications.
//!
//! Each notice lives through insert, slide-in, optional manual close,
//! auto-dismiss, and removal. Notices stack without limit.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::timer::TimerHandle;

/// Severity of a notice; drives its accent color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    /// Border accent; `None` keeps the theme default.
    #[must_use]
    pub const fn accent(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("#4CAF50"),
            Self::Error => Some("#F44336"),
            Self::Warning => Some("#FF9800"),
            Self::Info => None,
        }
    }

    /// Class suffix used in `notification-{kind}`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoticeId(pub u64);

/// Lifecycle stage of a live notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStage {
    /// Inserted off-screen, waiting for the slide-in.
    Entering,
    Visible,
    /// Sliding out; removal is scheduled.
    Leaving,
}

/// What the DOM needs to build a notice element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone)]
struct LiveNotice {
    view: NoticeView,
    stage: NoticeStage,
    auto_dismiss: Option<TimerHandle>,
}

/// Bookkeeping for every notice currently in the DOM.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    next_id: u64,
    live: BTreeMap<NoticeId, LiveNotice>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new notice and return its view.
    pub fn insert(&mut self, message: String, kind: NoticeKind) -> NoticeView {
        let id = NoticeId(self.next_id);
        self.next_id += 1;
        let view = NoticeView { id, kind, message };
        self.live.insert(
            id,
            LiveNotice {
                view: view.clone(),
                stage: NoticeStage::Entering,
                auto_dismiss: None,
            },
        );
        view
    }

    pub fn set_auto_dismiss(&mut self, id: NoticeId, handle: TimerHandle) {
        if let Some(notice) = self.live.get_mut(&id) {
            notice.auto_dismiss = Some(handle);
        }
    }

    /// Entering -> Visible. Returns `false` when the notice is gone or
    /// already closing.
    pub fn mark_visible(&mut self, id: NoticeId) -> bool {
        match self.live.get_mut(&id) {
            Some(notice) if notice.stage == NoticeStage::Entering => {
                notice.stage = NoticeStage::Visible;
                true
            }
            _ => false,
        }
    }

    /// Start the slide-out. Returns the pending auto-dismiss handle (if any)
    /// so the caller can cancel it, or `None` when there is nothing to close.
    pub fn begin_close(&mut self, id: NoticeId) -> Option<Option<TimerHandle>> {
        let notice = self.live.get_mut(&id)?;
        if notice.stage == NoticeStage::Leaving {
            return None;
        }
        notice.stage = NoticeStage::Leaving;
        Some(notice.auto_dismiss.take())
    }

    /// Drop the notice. Returns `false` if it was already removed.
    pub fn remove(&mut self, id: NoticeId) -> bool {
        self.live.remove(&id).is_some()
    }

    #[must_use]
    pub fn stage(&self, id: NoticeId) -> Option<NoticeStage> {
        self.live.get(&id).map(|n| n.stage)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn views(&self) -> impl Iterator<Item = &NoticeView> {
        self.live.values().map(|n| &n.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_follow_kind() {
        assert_eq!(NoticeKind::Success.accent(), Some("#4CAF50"));
        assert_eq!(NoticeKind::Error.accent(), Some("#F44336"));
        assert_eq!(NoticeKind::Warning.accent(), Some("#FF9800"));
        assert_eq!(NoticeKind::Info.accent(), None);
    }

    #[test]
    fn lifecycle_guards_double_close_and_double_remove() {
        let mut center = NotificationCenter::new();
        let view = center.insert("hi".into(), NoticeKind::Info);
        center.set_auto_dismiss(view.id, TimerHandle(9));
        assert!(center.mark_visible(view.id));
        assert_eq!(center.begin_close(view.id), Some(Some(TimerHandle(9))));
        assert_eq!(center.begin_close(view.id), None);
        assert!(!center.mark_visible(view.id));
        assert!(center.remove(view.id));
        assert!(!center.remove(view.id));
        assert!(center.is_empty());
    }

    #[test]
    fn notices_stack_independently() {
        let mut center = NotificationCenter::new();
        let a = center.insert("same".into(), NoticeKind::Info);
        let b = center.insert("same".into(), NoticeKind::Info);
        assert_ne!(a.id, b.id);
        assert_eq!(center.len(), 2);
    }
}
