use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::app_system::{FrontOfHouse, SystemConfig};
use crate::domain::{OrderCreate, OrderFilter, OrderId, OrderItem, OrderPatch, OrderStatus, OverrideRequest};
use crate::error::OrderError;
use crate::mock_framework::{FailingNotifier, RecordingNotifier};

fn burgers() -> Vec<OrderItem> {
    vec![OrderItem::new("1", 2, Decimal::new(1299, 2))]
}

fn start_recording() -> (FrontOfHouse, tokio::sync::mpsc::UnboundedReceiver<crate::notifications::StatusNotification>) {
    let (notifier, sent) = RecordingNotifier::channel();
    (FrontOfHouse::new(SystemConfig::default(), Arc::new(notifier)), sent)
}

#[tokio::test]
async fn test_order_walks_the_service_workflow() {
    let (system, _sent) = start_recording();
    let client = &system.order_client;

    let order = client.create_order(OrderCreate::new(4, "waiter_1", burgers())).await.unwrap();
    assert_eq!(order.id, OrderId(1));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount(), Decimal::new(2598, 2));

    let skipped = client.advance_status(order.id, OrderStatus::Preparing).await;
    assert_eq!(
        skipped,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Preparing
        })
    );

    let mut last_updated = order.updated_at;
    for next in [OrderStatus::Confirmed, OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Served] {
        let updated = client.advance_status(order.id, next).await.unwrap();
        assert_eq!(updated.status, next);
        assert!(updated.updated_at >= last_updated);
        last_updated = updated.updated_at;
    }

    let stored = client.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Served);
    assert_eq!(stored.created_at, order.created_at);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_is_terminal_and_idempotent() {
    let (system, _sent) = start_recording();
    let client = &system.order_client;

    let order = client.create_order(OrderCreate::new(2, "waiter_3", burgers())).await.unwrap();
    let cancelled = client.cancel_order(order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.items, order.items);
    assert_eq!(cancelled.total_amount(), order.total_amount());

    let again = client.cancel_order(order.id).await;
    assert!(matches!(again, Err(OrderError::AlreadyTerminal { status: OrderStatus::Cancelled, .. })));

    let stored = client.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored, cancelled);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_order_and_empty_order() {
    let (system, _sent) = start_recording();
    let client = &system.order_client;

    assert_eq!(client.cancel_order(OrderId(404)).await, Err(OrderError::NotFound("404".to_string())));
    assert_eq!(client.get_order(OrderId(404)).await, Ok(None));

    let empty = client.create_order(OrderCreate::new(1, "waiter_1", vec![])).await;
    assert_eq!(empty, Err(OrderError::EmptyOrder));

    let zero = vec![OrderItem::new("1", 0, Decimal::ONE)];
    let invalid = client.create_order(OrderCreate::new(1, "waiter_1", zero)).await;
    assert!(matches!(invalid, Err(OrderError::InvalidItem(_))));
    assert!(client.list_orders(&OrderFilter::all()).await.unwrap().is_empty());

    // Rejected creates never take an id.
    let first = client.create_order(OrderCreate::new(1, "waiter_1", burgers())).await.unwrap();
    assert_eq!(first.id, OrderId(1));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_item_update_recomputes_total() {
    let (system, _sent) = start_recording();
    let client = &system.order_client;

    let order = client.create_order(OrderCreate::new(6, "waiter_1", burgers())).await.unwrap();
    let patch = OrderPatch {
        items: Some(vec![
            OrderItem::new("1", 3, Decimal::new(1299, 2)),
            OrderItem::new("5", 1, Decimal::new(800, 2)),
        ]),
        ..OrderPatch::default()
    };
    let updated = client.update_order(order.id, patch).await.unwrap();
    assert_eq!(updated.total_amount(), Decimal::new(4697, 2));
    assert!(updated.updated_at >= order.updated_at);

    client.advance_status(order.id, OrderStatus::Confirmed).await.unwrap();
    client.cancel_order(order.id).await.unwrap();
    let frozen = client.update_order(order.id, OrderPatch::default()).await;
    assert!(matches!(frozen, Err(OrderError::AlreadyTerminal { .. })));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_can_clear_notes_and_email() {
    let (system, _sent) = start_recording();
    let client = &system.order_client;

    let create = OrderCreate::new(6, "waiter_1", burgers())
        .with_notes("x")
        .with_customer_email("guest@example.com");
    let order = client.create_order(create).await.unwrap();

    let patch = OrderPatch {
        notes: Some(None),
        customer_email: Some(None),
        ..OrderPatch::default()
    };
    client.update_order(order.id, patch).await.unwrap();

    let stored = client.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.notes, None);
    assert_eq!(stored.customer_email, None);
    assert_eq!(stored.items, order.items);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_revert_override_and_listing() {
    let (system, _sent) = start_recording();
    let client = &system.order_client;

    let first = client.create_order(OrderCreate::new(3, "waiter_1", burgers())).await.unwrap();
    let second = client.create_order(OrderCreate::new(5, "waiter_2", burgers())).await.unwrap();

    client.advance_status(first.id, OrderStatus::Confirmed).await.unwrap();
    client.advance_status(first.id, OrderStatus::Preparing).await.unwrap();
    let reverted = client
        .revert_to_pending(first.id, OverrideRequest::new("manager_1", "wrong table"))
        .await
        .unwrap();
    assert_eq!(reverted.status, OrderStatus::Pending);

    client.cancel_order(second.id).await.unwrap();

    let all = client.list_orders(&OrderFilter::all()).await.unwrap();
    assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![first.id, second.id]);

    let closed = client.list_orders(&OrderFilter::closed()).await.unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].id, second.id);

    let summary = client.summary().await.unwrap();
    assert_eq!(summary.count(OrderStatus::Pending), 1);
    assert_eq!(summary.count(OrderStatus::Cancelled), 1);
    assert_eq!(summary.open_orders, 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_notifications_follow_status_changes() {
    let (system, mut sent) = start_recording();
    let client = &system.order_client;

    let create = OrderCreate::new(7, "waiter_1", burgers()).with_customer_email("guest@example.com");
    let order = client.create_order(create).await.unwrap();
    client.advance_status(order.id, OrderStatus::Confirmed).await.unwrap();
    client.cancel_order(order.id).await.unwrap();

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let notification = tokio::time::timeout(Duration::from_secs(1), sent.recv())
            .await
            .expect("notification in time")
            .expect("notifier alive");
        assert_eq!(notification.order_id, order.id);
        statuses.push(notification.new_status);
    }
    statuses.sort();
    assert_eq!(statuses, vec![OrderStatus::Confirmed, OrderStatus::Cancelled]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_notification_keeps_status_change() {
    let system = FrontOfHouse::new(SystemConfig::default(), Arc::new(FailingNotifier));
    let client = &system.order_client;

    let create = OrderCreate::new(7, "waiter_1", burgers()).with_customer_email("guest@example.com");
    let order = client.create_order(create).await.unwrap();
    let confirmed = client.advance_status(order.id, OrderStatus::Confirmed).await.unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    tokio::task::yield_now().await;
    let stored = client.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Confirmed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_clients_share_one_store() {
    let (system, _sent) = start_recording();

    let mut tasks = Vec::new();
    for table in 0..20u32 {
        let client = system.order_client.clone();
        tasks.push(tokio::spawn(async move {
            client.create_order(OrderCreate::new(table, "waiter_1", burgers())).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let all = system.order_client.list_orders(&OrderFilter::all()).await.unwrap();
    let ids: Vec<u64> = all.iter().map(|o| o.id.0).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<u64>>());

    system.shutdown().await.unwrap();
}
