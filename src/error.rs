use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
///
/// Every variant is a local, recoverable failure. The stored order is left
/// exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order must contain at least one item")]
    EmptyOrder,
    #[error("Invalid order item: {0}")]
    InvalidItem(String),
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order {id} is already {status}")]
    AlreadyTerminal { id: String, status: OrderStatus },
    #[error("Override not permitted: {0}")]
    OverrideNotPermitted(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(err: FrameworkError<OrderError>) -> Self {
        match err {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Errors raised while delivering a customer notification.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
