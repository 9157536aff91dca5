use chrono::Utc;

use super::actions::OrderAction;
use crate::actor_framework::Entity;
use crate::domain::order::validate_items;
use crate::domain::{Order, OrderCreate, OrderId, OrderPatch};
use crate::error::OrderError;

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn validate_create(params: &OrderCreate) -> Result<(), OrderError> {
        validate_items(&params.items)
    }

    /// Creates a pending order stamped with the current time.
    ///
    /// # Errors
    /// `EmptyOrder` without items, `InvalidItem` for a zero quantity or negative price.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Order::from_create(id, params, Utc::now())
    }

    fn on_update(&mut self, patch: OrderPatch) -> Result<(), OrderError> {
        self.apply_patch(patch, Utc::now())
    }

    /// Handles lifecycle actions.
    ///
    /// # Actions
    /// - `Advance(status)`: forward step or cancellation per the transition table
    /// - `Cancel`: any non-terminal order
    /// - `RevertToPending(request)`: operator override for in-flight orders
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        let now = Utc::now();
        match action {
            OrderAction::Advance(next) => self.advance_status(next, now)?,
            OrderAction::Cancel => self.cancel(now)?,
            OrderAction::RevertToPending(request) => self.revert_to_pending(&request, now)?,
        }
        Ok(self.clone())
    }
}
