//! Stand-in for a system service that takes a moment to switch.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use miniscreen_core::{hotspot::ActionState, page::ActionHandler};

pub struct SimulatedService {
    name: String,
    state: Arc<Mutex<ActionState>>,
    delay: Duration,
}

impl SimulatedService {
    pub fn new(name: impl Into<String>, enabled: bool, delay: Duration) -> Self {
        let state = if enabled {
            ActionState::Enabled
        } else {
            ActionState::Disabled
        };
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(state)),
            delay,
        }
    }

    fn set_state(state: &Mutex<ActionState>, next: ActionState) {
        if let Ok(mut state) = state.lock() {
            *state = next;
        }
    }
}

impl ActionHandler for SimulatedService {
    fn state(&self) -> ActionState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(ActionState::Unknown)
    }

    fn request(&mut self, enable: bool) {
        log::info!(
            "{}: {} requested",
            self.name,
            if enable { "enable" } else { "disable" }
        );
        Self::set_state(&self.state, ActionState::Processing);
        let state = self.state.clone();
        let delay = self.delay;
        let name = self.name.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let next = if enable {
                ActionState::Enabled
            } else {
                ActionState::Disabled
            };
            Self::set_state(&state, next);
            log::info!("{}: now {:?}", name, next);
        });
    }
}
