//! Scripted controller for unit tests.

use super::{DeviceController, DeviceError, DeviceStatus};
use fieldnet_core::{DesiredAssignment, SLOT_COUNT};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How `read_status` answers when no one-shot reply is queued.
#[derive(Debug, Clone)]
pub enum ReadMode {
    /// Report the names most recently pushed by `configure_wifi`.
    EchoConfigured,
    /// Always report this status.
    Fixed(DeviceStatus),
    /// Always fail.
    Fail,
}

#[derive(Default)]
struct State {
    names: [String; SLOT_COUNT],
    wifi_pushes: Vec<DesiredAssignment>,
    ethernet_pushes: Vec<DesiredAssignment>,
    logins: usize,
    reads: usize,
    failing_logins: usize,
    failing_configures: usize,
    read_mode: Option<ReadMode>,
    queued_reads: VecDeque<Result<DeviceStatus, DeviceError>>,
}

/// Controller double whose device "converges" as soon as it is written.
///
/// Clones share state, so a test keeps one clone for assertions and hands the
/// other to the device actor.
#[derive(Clone, Default)]
pub struct ScriptedController {
    state: Arc<Mutex<State>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn set_read_mode(&self, mode: ReadMode) {
        self.with_state(|s| s.read_mode = Some(mode));
    }

    /// Queue one-shot replies consumed by the next reads, before `ReadMode`.
    pub fn queue_reads(
        &self,
        replies: impl IntoIterator<Item = Result<DeviceStatus, DeviceError>>,
    ) {
        self.with_state(|s| s.queued_reads.extend(replies));
    }

    pub fn fail_next_logins(&self, count: usize) {
        self.with_state(|s| s.failing_logins = count);
    }

    pub fn fail_next_configures(&self, count: usize) {
        self.with_state(|s| s.failing_configures = count);
    }

    pub fn logins(&self) -> usize {
        self.with_state(|s| s.logins)
    }

    pub fn reads(&self) -> usize {
        self.with_state(|s| s.reads)
    }

    pub fn wifi_pushes(&self) -> Vec<DesiredAssignment> {
        self.with_state(|s| s.wifi_pushes.clone())
    }

    pub fn ethernet_pushes(&self) -> Vec<DesiredAssignment> {
        self.with_state(|s| s.ethernet_pushes.clone())
    }

    pub fn max_concurrent_calls(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn scripted_error(operation: &str) -> DeviceError {
    DeviceError::Transport {
        endpoint: "mock".to_string(),
        message: format!("scripted {operation} failure"),
    }
}

impl DeviceController for ScriptedController {
    async fn login(&self) -> Result<(), DeviceError> {
        self.enter().await;
        let result = self.with_state(|s| {
            s.logins += 1;
            if s.failing_logins > 0 {
                s.failing_logins -= 1;
                Err(scripted_error("login"))
            } else {
                Ok(())
            }
        });
        self.exit();
        result
    }

    async fn configure_wifi(&self, desired: &DesiredAssignment) -> Result<(), DeviceError> {
        self.enter().await;
        let result = self.with_state(|s| {
            s.wifi_pushes.push(*desired);
            if s.failing_configures > 0 {
                s.failing_configures -= 1;
                return Err(scripted_error("configure"));
            }
            for (slot, team) in desired.occupied() {
                s.names[slot.index()] = team.to_string();
            }
            Ok(())
        });
        self.exit();
        result
    }

    async fn configure_ethernet(&self, desired: &DesiredAssignment) -> Result<(), DeviceError> {
        self.enter().await;
        self.with_state(|s| s.ethernet_pushes.push(*desired));
        self.exit();
        Ok(())
    }

    async fn read_status(&self) -> Result<DeviceStatus, DeviceError> {
        self.enter().await;
        let result = self.with_state(|s| {
            s.reads += 1;
            if let Some(reply) = s.queued_reads.pop_front() {
                return reply;
            }
            match s.read_mode.clone().unwrap_or(ReadMode::EchoConfigured) {
                ReadMode::EchoConfigured => Ok(DeviceStatus::from_names(s.names.clone())),
                ReadMode::Fixed(status) => Ok(status),
                ReadMode::Fail => Err(scripted_error("read")),
            }
        });
        self.exit();
        result
    }
}
