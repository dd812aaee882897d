//! Short-lived status messages shown to the user.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use uuid::Uuid;

/// How long a [`Toaster`] notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Notice {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        }
    }
}

/// Capability used by [`EmailForm`](crate::EmailForm) to tell the user what happened.
///
/// Implement this trait to render notices in your own front end.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, message: &str, kind: NoticeKind);
}

fn lock(notices: &Mutex<Vec<Notice>>) -> MutexGuard<'_, Vec<Notice>> {
    notices.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stacking, auto-dismissing notices.
///
/// Every call to [`Notifier::notify`] adds a notice that is removed after
/// [`NOTICE_TTL`]. Notices are independent of each other: identical messages
/// are not merged and nothing is queued. Dismissal runs on the current tokio
/// runtime.
#[derive(Clone)]
pub struct Toaster {
    visible: Arc<Mutex<Vec<Notice>>>,
    ttl: Duration,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        Self::with_ttl(NOTICE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Toaster {
            visible: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Notices currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Notice> {
        lock(&self.visible).clone()
    }
}

impl Notifier for Toaster {
    fn notify(&self, message: &str, kind: NoticeKind) {
        let notice = Notice::new(message, kind);
        match kind {
            NoticeKind::Success => log::info!("{}", notice.message),
            NoticeKind::Error => log::warn!("{}", notice.message),
        }

        let id = notice.id;
        lock(&self.visible).push(notice);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("no tokio runtime; notice {} will not be dismissed", id);
            return;
        };

        let visible = Arc::clone(&self.visible);
        let ttl = self.ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            lock(&visible).retain(|n| n.id != id);
            log::trace!("dismissed notice {}", id);
        });
    }
}

/// [`Notifier`] that keeps every notice, for development and testing.
#[derive(Clone, Default)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn last(&self) -> Option<Notice> {
        lock(&self.notices).last().cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        lock(&self.notices).push(Notice::new(message, kind));
    }
}
