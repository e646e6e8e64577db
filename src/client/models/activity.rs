use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::Notification;
use crate::client::models::load::{Generation, LoadStatus};

#[derive(Debug, Clone, Default)]
pub struct ActivityState {
    pub status: LoadStatus,
    pub notifications: Vec<Notification>,
    generation: Generation,
}

impl ActivityState {
    pub fn begin_load(&mut self) -> u64 {
        self.status = LoadStatus::Loading;
        self.generation.next()
    }

    /// Clears per-user data; outstanding stamps become stale.
    pub fn reset(&mut self) {
        let mut generation = self.generation;
        generation.invalidate();
        *self = Self { generation, ..Self::default() };
    }

    /// A missing session is reported as such; any other failure leaves an
    /// empty list behind and is only logged.
    pub fn apply(&mut self, stamp: u64, result: ClientResult<Vec<Notification>>) -> bool {
        if !self.generation.is_current(stamp) {
            return false;
        }
        match result {
            Ok(list) => {
                self.status = LoadStatus::settled(list.is_empty());
                self.notifications = list;
            }
            Err(ClientError::AuthRequired) => {
                self.notifications.clear();
                self.status = LoadStatus::Failed(ClientError::AuthRequired.to_string());
            }
            Err(e) => {
                log::warn!("[ACTIVITY] Could not load notifications: {}", e);
                self.notifications.clear();
                self.status = LoadStatus::Empty;
            }
        }
        true
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Flags a notification read locally; returns false if it already was.
    pub fn mark_read(&mut self, id: i64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.is_read => {
                n.is_read = true;
                true
            }
            _ => false,
        }
    }
}
