use crate::domain::{OrderStatus, OverrideRequest};

/// Custom actions for Order entities.
///
/// Every action answers with a snapshot of the order after the change.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to `OrderStatus`, validated against the transition table.
    Advance(OrderStatus),
    /// Cancels a pending, confirmed, preparing or ready order.
    Cancel,
    /// Operator override back to `Pending`.
    RevertToPending(OverrideRequest),
}

impl OrderAction {
    pub fn name(&self) -> &'static str {
        match self {
            OrderAction::Advance(_) => "advance",
            OrderAction::Cancel => "cancel",
            OrderAction::RevertToPending(_) => "revert_to_pending",
        }
    }
}
