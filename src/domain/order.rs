use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::OrderStatus;
use crate::error::OrderError;

/// Identifier assigned by the order store, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderItem {
    pub fn new(menu_item_id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            quantity,
            unit_price,
            special_instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Represents a table's order as tracked by front of house.
///
/// The total is never stored; [`Order::total_amount`] derives it from `items`
/// on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub table_number: u32,
    pub waiter_id: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub estimated_ready_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub table_number: u32,
    pub waiter_id: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
    pub estimated_ready_time: Option<DateTime<Utc>>,
}

impl OrderCreate {
    pub fn new(table_number: u32, waiter_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            table_number,
            waiter_id: waiter_id.into(),
            customer_email: None,
            items,
            notes: None,
            estimated_ready_time: None,
        }
    }

    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_estimated_ready_time(mut self, at: DateTime<Utc>) -> Self {
        self.estimated_ready_time = Some(at);
        self
    }
}

/// Payload for updating an open order. `None` leaves a field as it is.
/// `items`, when present, replaces the whole item list; the optional fields
/// take `Some(None)` to clear them.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub table_number: Option<u32>,
    pub waiter_id: Option<String>,
    pub customer_email: Option<Option<String>>,
    pub items: Option<Vec<OrderItem>>,
    pub notes: Option<Option<String>>,
    pub estimated_ready_time: Option<Option<DateTime<Utc>>>,
}

/// Operator override that sends an order back to `Pending`.
#[derive(Debug, Clone)]
pub struct OverrideRequest {
    /// Staff id of whoever approved the override.
    pub authorized_by: String,
    pub reason: String,
}

impl OverrideRequest {
    pub fn new(authorized_by: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            authorized_by: authorized_by.into(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    for item in items {
        if item.menu_item_id.trim().is_empty() {
            return Err(OrderError::InvalidItem("menu item id is empty".to_string()));
        }
        if item.quantity == 0 {
            return Err(OrderError::InvalidItem(format!(
                "quantity for {} must be at least 1",
                item.menu_item_id
            )));
        }
        if item.unit_price.is_sign_negative() {
            return Err(OrderError::InvalidItem(format!(
                "unit price for {} is negative",
                item.menu_item_id
            )));
        }
    }
    Ok(())
}

impl Order {
    pub(crate) fn from_create(id: OrderId, params: OrderCreate, now: DateTime<Utc>) -> Result<Self, OrderError> {
        validate_items(&params.items)?;
        Ok(Self {
            id,
            table_number: params.table_number,
            waiter_id: params.waiter_id,
            customer_email: params.customer_email,
            items: params.items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            estimated_ready_time: params.estimated_ready_time,
            notes: params.notes,
        })
    }

    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    fn ensure_open(&self) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::AlreadyTerminal {
                id: self.id.to_string(),
                status: self.status,
            });
        }
        Ok(())
    }

    // updated_at never moves backwards, even if the wall clock does.
    fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Replaces the fields present in `patch`. Served and cancelled orders are frozen.
    pub fn apply_patch(&mut self, patch: OrderPatch, now: DateTime<Utc>) -> Result<(), OrderError> {
        self.ensure_open()?;
        if let Some(items) = &patch.items {
            validate_items(items)?;
        }

        if let Some(table_number) = patch.table_number {
            self.table_number = table_number;
        }
        if let Some(waiter_id) = patch.waiter_id {
            self.waiter_id = waiter_id;
        }
        if let Some(email) = patch.customer_email {
            self.customer_email = email;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(at) = patch.estimated_ready_time {
            self.estimated_ready_time = at;
        }
        self.touch(now);
        Ok(())
    }

    pub fn advance_status(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(now);
        Ok(())
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), OrderError> {
        self.ensure_open()?;
        self.status = OrderStatus::Cancelled;
        self.touch(now);
        Ok(())
    }

    /// Sends an in-flight order back to `Pending`, bypassing the forward chain.
    pub fn revert_to_pending(&mut self, request: &OverrideRequest, now: DateTime<Utc>) -> Result<(), OrderError> {
        if request.authorized_by.trim().is_empty() {
            return Err(OrderError::OverrideNotPermitted(
                "an authorizing staff id is required".to_string(),
            ));
        }
        self.ensure_open()?;
        if self.status == OrderStatus::Pending {
            return Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Pending,
            });
        }
        self.status = OrderStatus::Pending;
        self.touch(now);
        Ok(())
    }
}
