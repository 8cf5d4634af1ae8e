//! DeviceActor Implementation
//!
//! Owns a single [`DeviceController`] and processes one message at a time,
//! which is what keeps calls against the physical controller serialized.

use super::messages::{ConfigureEthernet, ConfigureWifi, Login, ReadStatus};
use super::{DeviceController, DeviceError, DeviceStatus};
use crate::observability::{events, metrics};
use fieldnet_core::DesiredAssignment;
use kameo::{
    error::SendError,
    message::{Context, Message},
    prelude::*,
    Actor,
};
use tracing::{debug, trace};

/// Actor wrapping one physical network controller.
#[derive(Actor)]
pub struct DeviceActor<C: DeviceController> {
    /// Name used in logs and metrics
    name: String,
    controller: C,
    /// Number of calls handled, for tracing only
    calls: u64,
}

impl<C: DeviceController> DeviceActor<C> {
    pub fn new(name: impl Into<String>, controller: C) -> Self {
        Self {
            name: name.into(),
            controller,
            calls: 0,
        }
    }

    fn record_call(&mut self, operation: &str) {
        self.calls += 1;
        trace!(device = %self.name, operation, call = self.calls, "Device call");
    }
}

impl<C: DeviceController> Message<Login> for DeviceActor<C> {
    type Reply = Result<(), DeviceError>;

    async fn handle(&mut self, _msg: Login, _ctx: &mut Context<Self, Self::Reply>) -> Self::Reply {
        self.record_call("login");
        self.controller.login().await
    }
}

impl<C: DeviceController> Message<ConfigureWifi> for DeviceActor<C> {
    type Reply = Result<(), DeviceError>;

    async fn handle(
        &mut self,
        msg: ConfigureWifi,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        self.record_call("configure_wifi");
        debug!(device = %self.name, desired = %msg.desired, "Pushing WiFi configuration");
        self.controller.configure_wifi(&msg.desired).await
    }
}

impl<C: DeviceController> Message<ConfigureEthernet> for DeviceActor<C> {
    type Reply = Result<(), DeviceError>;

    async fn handle(
        &mut self,
        msg: ConfigureEthernet,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        self.record_call("configure_ethernet");
        debug!(device = %self.name, desired = %msg.desired, "Pushing Ethernet configuration");
        self.controller.configure_ethernet(&msg.desired).await
    }
}

impl<C: DeviceController> Message<ReadStatus> for DeviceActor<C> {
    type Reply = Result<DeviceStatus, DeviceError>;

    async fn handle(
        &mut self,
        _msg: ReadStatus,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        self.record_call("read_status");
        self.controller.read_status().await
    }
}

/// Cloneable handle to a running [`DeviceActor`].
pub struct DeviceHandle<C: DeviceController> {
    name: String,
    actor_ref: ActorRef<DeviceActor<C>>,
}

impl<C: DeviceController> Clone for DeviceHandle<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            actor_ref: self.actor_ref.clone(),
        }
    }
}

impl<C: DeviceController> DeviceHandle<C> {
    /// Spawn a [`DeviceActor`] for the controller and return its handle.
    pub fn spawn(name: impl Into<String>, controller: C) -> Self {
        let name = name.into();
        let actor_ref = kameo::spawn(DeviceActor::new(name.clone(), controller));
        events::actor_spawned("DeviceActor", &name);
        metrics::record_actor_spawned("DeviceActor");
        Self { name, actor_ref }
    }

    pub async fn login(&self) -> Result<(), DeviceError> {
        flatten(self.actor_ref.ask(Login).send().await)
    }

    pub async fn configure_wifi(&self, desired: DesiredAssignment) -> Result<(), DeviceError> {
        flatten(self.actor_ref.ask(ConfigureWifi { desired }).send().await)
    }

    pub async fn configure_ethernet(&self, desired: DesiredAssignment) -> Result<(), DeviceError> {
        flatten(
            self.actor_ref
                .ask(ConfigureEthernet { desired })
                .send()
                .await,
        )
    }

    pub async fn read_status(&self) -> Result<DeviceStatus, DeviceError> {
        flatten(self.actor_ref.ask(ReadStatus).send().await)
    }

    /// Stop the actor once its queued messages are handled.
    pub async fn stop(&self) {
        events::actor_stopped("DeviceActor", &self.name, "shutdown");
        metrics::record_actor_stopped("DeviceActor", "shutdown");
        self.actor_ref.stop_gracefully().await.ok();
    }
}

/// Collapse actor delivery failures into [`DeviceError::Unavailable`].
fn flatten<M, T>(result: Result<T, SendError<M, DeviceError>>) -> Result<T, DeviceError> {
    result.map_err(|err| match err {
        SendError::HandlerError(err) => err,
        other => DeviceError::Unavailable(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::{ReadMode, ScriptedController};
    use fieldnet_core::{Slot, TeamId};

    fn assignment(slot: Slot, team: u32) -> DesiredAssignment {
        let team = TeamId::new(team).ok();
        DesiredAssignment::empty().with_team(slot, team)
    }

    #[tokio::test]
    async fn test_handle_round_trip() {
        let controller = ScriptedController::new();
        let device = DeviceHandle::spawn("ap", controller.clone());

        let desired = assignment(Slot::Red2, 254);
        device.login().await.unwrap();
        device.configure_wifi(desired).await.unwrap();
        let status = device.read_status().await.unwrap();

        assert_eq!(status.slot(Slot::Red2).network_name, "254");
        assert_eq!(controller.logins(), 1);
        assert_eq!(controller.wifi_pushes(), vec![desired]);
    }

    #[tokio::test]
    async fn test_handler_error_passes_through() {
        let controller = ScriptedController::new();
        controller.set_read_mode(ReadMode::Fail);
        let device = DeviceHandle::spawn("ap", controller.clone());

        let err = device.read_status().await.unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Transport { ref message, .. } if message == "scripted read failure"
        ));
    }

    #[tokio::test]
    async fn test_shared_handle_serializes_calls() {
        let controller = ScriptedController::new();
        let device = DeviceHandle::spawn("ap", controller.clone());

        let mut tasks = Vec::new();
        for team in 1..=8 {
            let device = device.clone();
            tasks.push(tokio::spawn(async move {
                device.configure_wifi(assignment(Slot::Blue1, team)).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(controller.wifi_pushes().len(), 8);
        assert_eq!(controller.max_concurrent_calls(), 1);
    }
}
