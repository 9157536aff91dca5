//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.
//! [`RecordingNotifier`] and [`FailingNotifier`] stand in for the mail side.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::error::NotificationError;
use crate::notifications::{OrderNotifier, StatusNotification};

type Responder<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test owns, so a test can inspect each
/// request and answer it with success, failure, or nothing at all.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Notifier that forwards every notification to a channel the test reads.
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<StatusNotification>,
}

impl RecordingNotifier {
    /// The notifier plus the receiving end it forwards to.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StatusNotification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
    async fn notify(&self, notification: StatusNotification) -> Result<(), NotificationError> {
        self.sender
            .send(notification)
            .map_err(|e| NotificationError::Delivery(e.to_string()))
    }
}

/// Notifier whose every delivery fails.
pub struct FailingNotifier;

#[async_trait]
impl OrderNotifier for FailingNotifier {
    async fn notify(&self, _notification: StatusNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Delivery("smtp unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderCreate, OrderId, OrderItem};
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Order>(10);

        let list_task = tokio::spawn(async move { client.list().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        let items = vec![OrderItem::new("1", 1, Decimal::ONE)];
        let order = Order::from_create(OrderId(1), OrderCreate::new(2, "w", items), Utc::now()).unwrap();
        responder.send(Ok(vec![order.clone()])).unwrap();

        let result = list_task.await.unwrap();
        assert_eq!(result, Ok(vec![order]));
    }
}
