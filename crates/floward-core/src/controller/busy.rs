//! Busy (loading) state of the action controls.

use std::sync::{Arc, Mutex};

use super::{UiState, lock};

/// Controls that show a loading/disabled state while their request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    LoginSubmit,
    RegisterSubmit,
    SendCode,
}

/// Marks a control busy for as long as it lives, whatever way the handler exits.
pub(super) struct BusyGuard {
    state: Arc<Mutex<UiState>>,
    control: Control,
}

impl BusyGuard {
    /// `None` if the control is already busy, i.e. disabled.
    pub(super) fn engage(state: &Arc<Mutex<UiState>>, control: Control) -> Option<Self> {
        let mut guard = lock(state);
        let busy = guard.busy_flag(control);
        if *busy {
            return None;
        }
        *busy = true;
        drop(guard);

        Some(Self {
            state: Arc::clone(state),
            control,
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        *lock(&self.state).busy_flag(self.control) = false;
    }
}
