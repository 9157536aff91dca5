use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::SystemConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::OrderClient;
use crate::domain::{Order, OrderId};
use crate::error::SystemError;
use crate::notifications::{OrderNotifier, TracingNotifier};

/// The front-of-house system: owns the order store actor and hands out clients.
///
/// Startup wires the notifier and configuration into the [`OrderClient`];
/// shutdown stops the store and waits for its task.
pub struct FrontOfHouse {
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl FrontOfHouse {
    #[instrument(name = "front_of_house", skip(notifier))]
    pub fn new(config: SystemConfig, notifier: Arc<dyn OrderNotifier>) -> Self {
        info!("Starting front-of-house system");

        let order_id_counter = Arc::new(AtomicU64::new(1));
        let next_order_id = move || OrderId(order_id_counter.fetch_add(1, Ordering::SeqCst));

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.channel_buffer, next_order_id);
        let order_handle = tokio::spawn(order_actor.run());

        let order_client = OrderClient::new(order_resource_client, notifier, Arc::new(config));

        info!("Front-of-house system started");
        Self {
            order_client,
            handles: vec![order_handle],
        }
    }

    /// Defaults plus `FOH_*` environment overrides, notifications to the trace log.
    pub fn from_env() -> Self {
        Self::new(SystemConfig::from_env(), Arc::new(TracingNotifier))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down front-of-house system");

        if let Err(e) = self.order_client.shutdown().await {
            error!(error = %e, "Order store already stopped");
        }

        for handle in self.handles {
            handle.await?;
        }

        info!("Front-of-house shutdown complete");
        Ok(())
    }
}
