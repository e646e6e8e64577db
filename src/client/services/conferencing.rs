//! Boundary to the external conferencing service.
//!
//! The call flow only talks to [`ConferencingBackend`]; [`JitsiMeetBackend`]
//! is the concrete implementation and turns a [`ConferenceConfig`] into a Jitsi
//! Meet link carrying the configuration in its fragment. With an opener set,
//! the link is launched as the session starts.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use url::Url;

use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::{CallSession, CallType};

/// Features switched off for every call.
pub const DISABLED_FEATURES: &[&str] = &[
    "disableInviteFunctions",
    "disablePolls",
    "disableReactions",
    "disablePrivateChat",
    "disableVirtualBackground",
    "disableAddingBackgroundImages",
    "disableProfile",
    "disableKick",
    "disableRemoteMute",
    "disableLobbyMode",
    "disableDeepLinking",
    "disableShortcuts",
    "disableModeratorIndicator",
    "disableLocalVideoFlip",
];

pub const TOOLBAR_BUTTONS: &[&str] = &["microphone", "camera", "hangup"];
pub const SETTINGS_SECTIONS: &[&str] = &["devices", "language"];

#[derive(Debug, Clone, PartialEq)]
pub struct ConferenceConfig {
    pub room_name: String,
    pub display_name: String,
    pub start_audio_muted: bool,
    pub start_video_muted: bool,
    pub p2p_enabled: bool,
    pub channel_last_n: u32,
}

impl ConferenceConfig {
    pub fn for_call(call: &CallSession, display_name: &str) -> Self {
        Self {
            room_name: call.room_name.clone(),
            display_name: display_name.to_string(),
            start_audio_muted: false,
            start_video_muted: call.call_type == CallType::Audio,
            p2p_enabled: true,
            channel_last_n: 2,
        }
    }

    /// Every override as `(key, json value)`, in a stable order.
    pub fn overrides(&self) -> Vec<(String, Value)> {
        let mut out: Vec<(String, Value)> = vec![
            ("config.startWithAudioMuted".into(), json!(self.start_audio_muted)),
            ("config.startWithVideoMuted".into(), json!(self.start_video_muted)),
            ("config.prejoinPageEnabled".into(), json!(false)),
            ("config.enableWelcomePage".into(), json!(false)),
            ("config.enableClosePage".into(), json!(false)),
            ("config.startScreenSharing".into(), json!(false)),
            ("config.enableEmailInStats".into(), json!(false)),
            ("config.enableInsecureRoomNameWarning".into(), json!(false)),
            ("config.channelLastN".into(), json!(self.channel_last_n)),
            ("config.p2p.enabled".into(), json!(self.p2p_enabled)),
        ];
        out.extend(DISABLED_FEATURES.iter().map(|f| (format!("config.{}", f), json!(true))));
        out.extend([
            ("interfaceConfig.TOOLBAR_BUTTONS".to_string(), json!(TOOLBAR_BUTTONS)),
            ("interfaceConfig.SETTINGS_SECTIONS".to_string(), json!(SETTINGS_SECTIONS)),
            ("interfaceConfig.SHOW_JITSI_WATERMARK".to_string(), json!(false)),
            ("interfaceConfig.SHOW_WATERMARK_FOR_GUESTS".to_string(), json!(false)),
            ("interfaceConfig.SHOW_BRAND_WATERMARK".to_string(), json!(false)),
            ("interfaceConfig.SHOW_POWERED_BY".to_string(), json!(false)),
            ("interfaceConfig.MOBILE_APP_PROMO".to_string(), json!(false)),
            ("interfaceConfig.DISABLE_JOIN_LEAVE_NOTIFICATIONS".to_string(), json!(true)),
            ("userInfo.displayName".to_string(), json!(self.display_name)),
        ]);
        out
    }
}

/// Signals from a running meeting.
///
/// A meeting launched in the system browser reports nothing back: the only
/// event it produces is the `ReadyToClose` raised by the in-app hang-up via
/// [`JitsiMeetBackend::emit`]. Participant events come from backends that
/// embed the meeting themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConferenceEvent {
    ReadyToClose,
    ParticipantJoined(String),
    ParticipantLeft(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceHandle {
    pub id: u64,
    pub join_url: String,
}

pub type EventListener = Box<dyn Fn(ConferenceEvent) + Send + Sync>;
pub type MeetingOpener = Box<dyn Fn(&str) -> ClientResult<()> + Send + Sync>;

pub fn open_in_browser(url: &str) -> ClientResult<()> {
    webbrowser::open(url).map_err(|e| ClientError::Conference(e.to_string()))
}

pub trait ConferencingBackend: Send + Sync {
    fn start(&self, config: &ConferenceConfig) -> ClientResult<ConferenceHandle>;
    fn subscribe(&self, handle: &ConferenceHandle, listener: EventListener);
    fn stop(&self, handle: &ConferenceHandle);
}

pub struct JitsiMeetBackend {
    domain: String,
    next_id: AtomicU64,
    listeners: Mutex<HashMap<u64, Vec<EventListener>>>,
    opener: Option<MeetingOpener>,
}

impl JitsiMeetBackend {
    /// Builds links only; nothing is launched.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(HashMap::new()),
            opener: None,
        }
    }

    pub fn with_opener(mut self, opener: MeetingOpener) -> Self {
        self.opener = Some(opener);
        self
    }

    pub fn meeting_url(&self, config: &ConferenceConfig) -> ClientResult<String> {
        let mut url = Url::parse(&format!("https://{}/", self.domain))
            .map_err(|e| ClientError::validation(format!("invalid conference domain: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("conference domain cannot carry a room"))?
            .pop_if_empty()
            .push(&config.room_name);
        let fragment = config
            .overrides()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(&value.to_string())))
            .collect::<Vec<_>>()
            .join("&");
        url.set_fragment(Some(&fragment));
        Ok(url.to_string())
    }

    /// Delivers an event to every listener of a running session. Used for
    /// signals raised outside the embedded meeting, such as the hang-up button.
    pub fn emit(&self, handle: &ConferenceHandle, event: ConferenceEvent) {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(list) = listeners.get(&handle.id) {
            for listener in list {
                listener(event.clone());
            }
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl ConferencingBackend for JitsiMeetBackend {
    fn start(&self, config: &ConferenceConfig) -> ClientResult<ConferenceHandle> {
        let join_url = self.meeting_url(config)?;
        if let Some(open) = &self.opener {
            open(&join_url)?;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, Vec::new());
        log::info!("[CALL] Jitsi session #{} for room '{}'", id, config.room_name);
        Ok(ConferenceHandle { id, join_url })
    }

    fn subscribe(&self, handle: &ConferenceHandle, listener: EventListener) {
        if let Some(list) = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(&handle.id)
        {
            list.push(listener);
        }
    }

    fn stop(&self, handle: &ConferenceHandle) {
        let removed = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle.id);
        if removed.is_some() {
            log::info!("[CALL] Jitsi session #{} stopped", handle.id);
        }
    }
}

fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn call(room: &str, call_type: CallType) -> CallSession {
        CallSession { room_name: room.to_string(), call_type }
    }

    #[test]
    fn audio_calls_start_with_video_muted() {
        let audio = ConferenceConfig::for_call(&call("r", CallType::Audio), "User");
        assert!(audio.start_video_muted);
        assert!(!audio.start_audio_muted);
        let video = ConferenceConfig::for_call(&call("r", CallType::Video), "User");
        assert!(!video.start_video_muted);
    }

    #[test]
    fn meeting_url_carries_room_and_overrides() {
        let backend = JitsiMeetBackend::new("meet.jit.si");
        let cfg = ConferenceConfig::for_call(&call("threads-call-abc123", CallType::Audio), "John Doe");
        let url = backend.meeting_url(&cfg).unwrap();
        assert!(url.starts_with("https://meet.jit.si/threads-call-abc123#"));
        assert!(url.contains("config.startWithVideoMuted=true"));
        assert!(url.contains("config.startWithAudioMuted=false"));
        assert!(url.contains("config.disableInviteFunctions=true"));
        assert!(url.contains("userInfo.displayName=%22John%20Doe%22"));
        assert!(url.contains("interfaceConfig.TOOLBAR_BUTTONS="));
    }

    #[test]
    fn room_names_are_path_encoded() {
        let backend = JitsiMeetBackend::new("meet.jit.si");
        let cfg = ConferenceConfig::for_call(&call("team sync", CallType::Video), "User");
        let url = backend.meeting_url(&cfg).unwrap();
        assert!(url.starts_with("https://meet.jit.si/team%20sync#"));
    }

    #[test]
    fn opener_receives_the_join_url() {
        let opened = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = opened.clone();
        let backend = JitsiMeetBackend::new("meet.jit.si").with_opener(Box::new(move |url: &str| -> ClientResult<()> {
            sink.lock().unwrap().push(url.to_string());
            Ok(())
        }));
        let cfg = ConferenceConfig::for_call(&call("standup", CallType::Video), "User");
        let handle = backend.start(&cfg).unwrap();
        assert_eq!(*opened.lock().unwrap(), vec![handle.join_url]);
        assert_eq!(backend.active_sessions(), 1);
    }

    #[test]
    fn failed_launch_starts_no_session() {
        let refuse = |_: &str| -> ClientResult<()> { Err(ClientError::Conference("no browser".into())) };
        let backend = JitsiMeetBackend::new("meet.jit.si").with_opener(Box::new(refuse));
        let cfg = ConferenceConfig::for_call(&call("standup", CallType::Video), "User");
        let err = backend.start(&cfg).unwrap_err();
        assert_eq!(err.to_string(), "Could not open the meeting: no browser");
        assert_eq!(backend.active_sessions(), 0);
    }

    #[test]
    fn listeners_receive_events_until_stopped() {
        let backend = JitsiMeetBackend::new("meet.jit.si");
        let cfg = ConferenceConfig::for_call(&call("r", CallType::Video), "User");
        let handle = backend.start(&cfg).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        backend.subscribe(&handle, Box::new(move |ev| sink.lock().unwrap().push(ev)));

        backend.emit(&handle, ConferenceEvent::ParticipantJoined("alice".into()));
        backend.stop(&handle);
        backend.emit(&handle, ConferenceEvent::ReadyToClose);

        assert_eq!(*seen.lock().unwrap(), vec![ConferenceEvent::ParticipantJoined("alice".into())]);
        assert_eq!(backend.active_sessions(), 0);
    }
}
