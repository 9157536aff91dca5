//! Customer notifications sent when an order changes status.
//!
//! Delivery is fire-and-forget: the order client hands the notification to a
//! spawned task and never waits on it, so a failed send cannot undo a status
//! change.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Order, OrderId, OrderItem, OrderStatus};
use crate::error::NotificationError;

/// Everything a notifier needs to tell a customer about a status change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusNotification {
    pub order_id: OrderId,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub new_status: OrderStatus,
}

impl StatusNotification {
    /// `None` when the order has no customer email on file.
    pub fn for_order(order: &Order) -> Option<Self> {
        let email = order.customer_email.as_deref()?.trim();
        if email.is_empty() {
            return None;
        }
        Some(Self {
            order_id: order.id,
            customer_email: email.to_string(),
            items: order.items.clone(),
            total_amount: order.total_amount(),
            new_status: order.status,
        })
    }

    pub fn subject(&self) -> String {
        let headline = match self.new_status {
            OrderStatus::Pending => "has been received",
            OrderStatus::Confirmed => "is confirmed",
            OrderStatus::Preparing => "is being prepared",
            OrderStatus::Ready => "is ready",
            OrderStatus::Served => "has been served",
            OrderStatus::Cancelled => "has been cancelled",
        };
        format!("Your order #{} {}", self.order_id, headline)
    }

    pub fn body(&self) -> String {
        let mut body = format!("Order #{} is now {}.\n\n", self.order_id, self.new_status);
        for item in &self.items {
            let line = match &item.special_instructions {
                Some(instructions) => format!(
                    "{} x {} @ {} ({})\n",
                    item.quantity, item.menu_item_id, item.unit_price, instructions
                ),
                None => format!("{} x {} @ {}\n", item.quantity, item.menu_item_id, item.unit_price),
            };
            body.push_str(&line);
        }
        body.push_str(&format!("\nTotal: {}", self.total_amount));
        body
    }
}

/// Sends status notifications to customers.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn notify(&self, notification: StatusNotification) -> Result<(), NotificationError>;
}

/// Notifier that writes the rendered message to the trace log instead of
/// talking to a mail provider.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl OrderNotifier for TracingNotifier {
    async fn notify(&self, notification: StatusNotification) -> Result<(), NotificationError> {
        info!(
            order_id = %notification.order_id,
            recipient = %notification.customer_email,
            subject = %notification.subject(),
            "Customer notification sent"
        );
        debug!(body = %notification.body(), "Notification body");
        Ok(())
    }
}
