use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use league_tracker::league::{Notification, NotificationLevel, Notifier};
use league_tracker::store::{InMemoryBackend, KeyValueBackend, StoreError};

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.title).collect()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.all()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// In-memory backend that can be told to reject writes, like a full quota
#[derive(Default)]
pub struct QuotaBackend {
    inner: InMemoryBackend,
    full: AtomicBool,
}

impl QuotaBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_full(&self, full: bool) {
        self.full.store(full, Ordering::SeqCst);
    }
}

impl KeyValueBackend for QuotaBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.full.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("storage quota exceeded".to_string()));
        }
        self.inner.write(key, value)
    }
}
