use rand::Rng;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};

use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::{CallSession, CallType};
use crate::client::services::conferencing::{
    ConferenceConfig, ConferenceEvent, ConferenceHandle, ConferencingBackend,
};

pub const ROOM_PREFIX: &str = "threads-call-";
const ROOM_ID_LEN: usize = 13;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `threads-call-` followed by random base-36 characters. Collisions are
/// unlikely, not impossible.
pub fn generate_room_name<R: Rng>(rng: &mut R) -> String {
    let id: String = (0..ROOM_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", ROOM_PREFIX, id)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Initiating {
        room_input: String,
        call_type: CallType,
    },
    Active {
        call: CallSession,
        handle: ConferenceHandle,
        participants: Vec<String>,
    },
}

/// Idle → Initiating → Active → Idle.
#[derive(Debug, Default)]
pub struct CallFlow {
    state: CallState,
    events: Option<UnboundedReceiver<ConferenceEvent>>,
}

impl CallFlow {
    pub fn state(&self) -> &CallState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == CallState::Idle
    }

    /// Backend session id of the running call.
    pub fn session_id(&self) -> Option<u64> {
        match &self.state {
            CallState::Active { handle, .. } => Some(handle.id),
            _ => None,
        }
    }

    /// Opens the initiation form with `call_type` preselected.
    pub fn open(&mut self, call_type: CallType) {
        if matches!(self.state, CallState::Active { .. }) {
            return;
        }
        self.state = CallState::Initiating { room_input: String::new(), call_type };
    }

    pub fn set_room_input(&mut self, value: String) {
        if let CallState::Initiating { room_input, .. } = &mut self.state {
            *room_input = value;
        }
    }

    pub fn set_call_type(&mut self, value: CallType) {
        if let CallState::Initiating { call_type, .. } = &mut self.state {
            *call_type = value;
        }
    }

    /// Leaves the initiation form without creating a call.
    pub fn cancel(&mut self) {
        if matches!(self.state, CallState::Initiating { .. }) {
            self.state = CallState::Idle;
        }
    }

    /// Confirms the initiation form and starts the conference.
    pub fn start(&mut self, backend: &dyn ConferencingBackend, display_name: &str) -> ClientResult<CallSession> {
        self.start_with_rng(backend, display_name, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng>(
        &mut self,
        backend: &dyn ConferencingBackend,
        display_name: &str,
        rng: &mut R,
    ) -> ClientResult<CallSession> {
        let CallState::Initiating { room_input, call_type } = &self.state else {
            return Err(ClientError::validation("No call is being set up"));
        };
        let room_name = match room_input.trim() {
            "" => generate_room_name(rng),
            given => given.to_string(),
        };
        let call = CallSession { room_name, call_type: *call_type };
        let config = ConferenceConfig::for_call(&call, display_name);
        let handle = backend.start(&config)?;

        let (tx, rx) = mpsc::unbounded_channel();
        backend.subscribe(&handle, Box::new(move |event| {
            let _ = tx.send(event);
        }));
        self.events = Some(rx);

        log::info!("[CALL] {} call started in room '{}'", call.call_type, call.room_name);
        self.state = CallState::Active { call: call.clone(), handle, participants: Vec::new() };
        Ok(call)
    }

    /// Applies every pending backend event. Returns the finished call when
    /// the backend asked to close.
    pub fn poll_events(&mut self, backend: &dyn ConferencingBackend) -> Option<CallSession> {
        loop {
            let event = match self.events.as_mut()?.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("[CALL] Conference event stream closed");
                    return self.end(backend);
                }
            };
            match event {
                ConferenceEvent::ReadyToClose => return self.end(backend),
                ConferenceEvent::ParticipantJoined(name) => {
                    log::info!("[CALL] Participant joined: {}", name);
                    if let CallState::Active { participants, .. } = &mut self.state {
                        participants.push(name);
                    }
                }
                ConferenceEvent::ParticipantLeft(name) => {
                    log::info!("[CALL] Participant left: {}", name);
                    if let CallState::Active { participants, .. } = &mut self.state {
                        if let Some(pos) = participants.iter().position(|p| *p == name) {
                            participants.remove(pos);
                        }
                    }
                }
            }
        }
    }

    /// Stops the conference and returns to `Idle`, handing back the finished call.
    pub fn end(&mut self, backend: &dyn ConferencingBackend) -> Option<CallSession> {
        self.events = None;
        match std::mem::take(&mut self.state) {
            CallState::Active { call, handle, .. } => {
                backend.stop(&handle);
                log::info!("[CALL] Call in room '{}' ended", call.room_name);
                Some(call)
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::services::conferencing::{EventListener, JitsiMeetBackend};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// Backend that remembers its configs and lets the test fire events.
    #[derive(Default)]
    struct FakeBackend {
        configs: Mutex<Vec<ConferenceConfig>>,
        listener: Mutex<Option<EventListener>>,
        stopped: Mutex<Vec<u64>>,
    }

    impl FakeBackend {
        fn fire(&self, event: ConferenceEvent) {
            if let Some(l) = self.listener.lock().unwrap().as_ref() {
                l(event);
            }
        }
    }

    impl ConferencingBackend for FakeBackend {
        fn start(&self, config: &ConferenceConfig) -> ClientResult<ConferenceHandle> {
            self.configs.lock().unwrap().push(config.clone());
            Ok(ConferenceHandle { id: 7, join_url: format!("https://meet.test/{}", config.room_name) })
        }
        fn subscribe(&self, _handle: &ConferenceHandle, listener: EventListener) {
            *self.listener.lock().unwrap() = Some(listener);
        }
        fn stop(&self, handle: &ConferenceHandle) {
            self.stopped.lock().unwrap().push(handle.id);
        }
    }

    #[test]
    fn generated_room_has_prefix_and_base36_suffix() {
        let mut rng = StdRng::seed_from_u64(42);
        let room = generate_room_name(&mut rng);
        let suffix = room.strip_prefix(ROOM_PREFIX).unwrap();
        assert_eq!(suffix.len(), 13);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_room_name(&mut rng), room);
    }

    #[test]
    fn blank_room_generates_id_and_close_signal_returns_to_idle() {
        let backend = FakeBackend::default();
        let mut flow = CallFlow::default();
        flow.open(CallType::Video);
        flow.set_room_input("   ".into());

        let call = flow.start(&backend, "User").unwrap();
        assert!(call.room_name.starts_with(ROOM_PREFIX));
        assert!(matches!(flow.state(), CallState::Active { .. }));
        assert_eq!(flow.session_id(), Some(7));

        backend.fire(ConferenceEvent::ReadyToClose);
        assert_eq!(flow.poll_events(&backend), Some(call));
        assert!(flow.is_idle());
        assert_eq!(flow.session_id(), None);
        assert_eq!(*backend.stopped.lock().unwrap(), vec![7]);
    }

    #[test]
    fn audio_call_configures_video_muted() {
        let backend = FakeBackend::default();
        let mut flow = CallFlow::default();
        flow.open(CallType::Video);
        flow.set_call_type(CallType::Audio);
        flow.set_room_input("standup".into());
        flow.start(&backend, "User").unwrap();

        let configs = backend.configs.lock().unwrap();
        assert_eq!(configs[0].room_name, "standup");
        assert!(configs[0].start_video_muted);
        assert!(!configs[0].start_audio_muted);
    }

    #[test]
    fn cancel_never_creates_a_call() {
        let backend = FakeBackend::default();
        let mut flow = CallFlow::default();
        flow.open(CallType::Audio);
        flow.cancel();
        assert!(flow.is_idle());
        assert!(flow.start(&backend, "User").is_err());
        assert!(backend.configs.lock().unwrap().is_empty());
    }

    #[test]
    fn participants_are_tracked_until_close() {
        let backend = FakeBackend::default();
        let mut flow = CallFlow::default();
        flow.open(CallType::Video);
        flow.start(&backend, "User").unwrap();

        backend.fire(ConferenceEvent::ParticipantJoined("alice".into()));
        backend.fire(ConferenceEvent::ParticipantJoined("bob".into()));
        backend.fire(ConferenceEvent::ParticipantLeft("alice".into()));
        assert_eq!(flow.poll_events(&backend), None);
        match flow.state() {
            CallState::Active { participants, .. } => assert_eq!(participants, &vec!["bob".to_string()]),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn hang_up_through_jitsi_backend() {
        let backend = JitsiMeetBackend::new("meet.jit.si");
        let mut flow = CallFlow::default();
        flow.open(CallType::Video);
        flow.set_room_input("threads-call-demo".into());
        flow.start(&backend, "User").unwrap();
        let handle = match flow.state() {
            CallState::Active { handle, .. } => handle.clone(),
            _ => unreachable!(),
        };
        assert!(handle.join_url.contains("threads-call-demo"));

        backend.emit(&handle, ConferenceEvent::ReadyToClose);
        assert!(flow.poll_events(&backend).is_some());
        assert!(flow.is_idle());
        assert_eq!(backend.active_sessions(), 0);
    }
}
