use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::actor_framework::ResourceClient;
use crate::app_system::SystemConfig;
use crate::domain::{
    Order, OrderCreate, OrderFilter, OrderId, OrderPatch, OrderStatus, OrderSummary, OverrideRequest,
};
use crate::error::OrderError;
use crate::notifications::{OrderNotifier, StatusNotification};
use crate::order_actor::OrderAction;

/// Client for interacting with the Order actor.
///
/// This is the API the presentation layer calls. Every method returns the
/// updated order synchronously for re-render; customer notifications for the
/// new status go out on a background task afterwards.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    notifier: Arc<dyn OrderNotifier>,
    config: Arc<SystemConfig>,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        notifier: Arc<dyn OrderNotifier>,
        config: Arc<SystemConfig>,
    ) -> Self {
        Self {
            inner,
            notifier,
            config,
        }
    }

    #[instrument(
        skip(self, params),
        fields(table = params.table_number, waiter_id = %params.waiter_id, lines = params.items.len())
    )]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.inner.create(params).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total_amount(), "Order created");
                Ok(order)
            }
            Err(e) => {
                let e = OrderError::from(e);
                warn!(error = %e, "Order rejected");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    /// Orders matching `filter`, in id order.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let orders = self.inner.list().await?;
        Ok(orders.into_iter().filter(|order| filter.matches(order)).collect())
    }

    #[instrument(skip(self, patch), fields(order_id = %id, replaces_items = patch.items.is_some()))]
    pub async fn update_order(&self, id: OrderId, patch: OrderPatch) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.update(id, patch).await?;
        info!(total = %order.total_amount(), "Order updated");
        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %id, next = %next))]
    pub async fn advance_status(&self, id: OrderId, next: OrderStatus) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Advance(next)).await
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Cancel).await
    }

    /// Operator override. Only available when the system is configured to allow it.
    #[instrument(
        skip(self, request),
        fields(order_id = %id, authorized_by = %request.authorized_by)
    )]
    pub async fn revert_to_pending(&self, id: OrderId, request: OverrideRequest) -> Result<Order, OrderError> {
        if !self.config.allow_revert_override {
            warn!("Revert override requested while disabled");
            return Err(OrderError::OverrideNotPermitted(
                "revert to pending is disabled".to_string(),
            ));
        }
        warn!(reason = %request.reason, "Revert override requested");
        self.perform(id, OrderAction::RevertToPending(request)).await
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<OrderSummary, OrderError> {
        let orders = self.inner.list().await?;
        let summary = OrderSummary::from_orders(&orders);
        info!(open_orders = summary.open_orders, served_revenue = %summary.served_revenue, "Summary built");
        Ok(summary)
    }

    /// Stops the order store. Requests already queued behind it are dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        Ok(self.inner.shutdown().await?)
    }

    async fn perform(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        let action_name = action.name();
        match self.inner.perform_action(id, action).await {
            Ok(order) => {
                info!(action = action_name, status = %order.status, "Order status changed");
                self.dispatch_notification(&order);
                Ok(order)
            }
            Err(e) => {
                let e = OrderError::from(e);
                warn!(action = action_name, error = %e, "Order action rejected");
                Err(e)
            }
        }
    }

    fn dispatch_notification(&self, order: &Order) {
        if !self.config.notifies_on(order.status) {
            return;
        }
        let Some(notification) = StatusNotification::for_order(order) else {
            debug!("No customer email on file, skipping notification");
            return;
        };

        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(
            async move {
                let order_id = notification.order_id;
                if let Err(e) = notifier.notify(notification).await {
                    error!(order_id = %order_id, error = %e, "Customer notification failed");
                }
            }
            .in_current_span(),
        );
    }
}
