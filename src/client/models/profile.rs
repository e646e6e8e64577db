use crate::client::error::{ClientError, ClientResult};
use crate::client::models::call::CallFlow;
use crate::client::models::domain::User;
use crate::client::models::load::{Generation, LoadStatus};
use crate::client::services::api_client::ProfileUpdate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
    pub saving: bool,
    pub error: Option<String>,
}

impl From<&User> for ProfileDraft {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            avatar_url: user.avatar_url.clone().unwrap_or_default(),
            saving: false,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProfileState {
    pub status: LoadStatus,
    pub user: Option<User>,
    pub draft: Option<ProfileDraft>,
    pub call: CallFlow,
    generation: Generation,
}

impl ProfileState {
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

    pub fn apply(&mut self, stamp: u64, result: ClientResult<User>) -> bool {
        if !self.generation.is_current(stamp) {
            return false;
        }
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                log::warn!("[PROFILE] Could not load profile: {}", e);
                self.user = None;
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    pub fn is_saving(&self) -> bool {
        self.draft.as_ref().is_some_and(|d| d.saving)
    }

    pub fn start_editing(&mut self) {
        if let Some(user) = &self.user {
            self.draft = Some(ProfileDraft::from(user));
        }
    }

    pub fn cancel_editing(&mut self) {
        self.draft = None;
    }

    pub fn begin_save(&mut self) -> ClientResult<ProfileUpdate> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(ClientError::validation("Nothing to save"));
        };
        let name = draft.name.trim();
        if name.is_empty() {
            let err = ClientError::validation("Name cannot be empty");
            draft.error = Some(err.to_string());
            return Err(err);
        }
        draft.saving = true;
        draft.error = None;
        Ok(ProfileUpdate {
            name: name.to_string(),
            bio: draft.bio.trim().to_string(),
            avatar_url: draft.avatar_url.trim().to_string(),
        })
    }

    pub fn save_finished(&mut self, result: ClientResult<User>) {
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.status = LoadStatus::Ready;
                self.draft = None;
            }
            Err(e) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.saving = false;
                    draft.error = Some(e.to_string());
                }
            }
        }
    }
}
