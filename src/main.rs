use tracing::{error, info, warn, Instrument};

use front_of_house::app_system::{setup_tracing, FrontOfHouse};
use front_of_house::domain::{OrderCreate, OrderFilter, OrderItem, OrderStatus, OverrideRequest};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting front-of-house demo");
    let system = FrontOfHouse::from_env();
    let orders = &system.order_client;

    let span = tracing::info_span!("table_4");
    let burgers = async {
        let items = vec![
            OrderItem::new("1", 2, Decimal::new(1299, 2)),
            OrderItem::new("7", 1, Decimal::new(450, 2)).with_instructions("no ice"),
        ];
        let create = OrderCreate::new(4, "waiter_1", items)
            .with_customer_email("guest@example.com")
            .with_notes("birthday, bring candles")
            .with_estimated_ready_time(Utc::now() + Duration::minutes(20));
        let order = orders.create_order(create).await?;

        if let Err(e) = orders.advance_status(order.id, OrderStatus::Preparing).await {
            warn!(error = %e, "Kitchen tried to skip confirmation");
        }

        let mut status = order.status;
        while let Some(next) = status.next() {
            status = orders.advance_status(order.id, next).await?.status;
        }
        Ok::<_, front_of_house::error::OrderError>(order.id)
    }
    .instrument(span)
    .await?;
    info!(order_id = %burgers, "Order served");

    let span = tracing::info_span!("table_9");
    async {
        let items = vec![OrderItem::new("3", 1, Decimal::new(1850, 2))];
        let order = orders.create_order(OrderCreate::new(9, "waiter_2", items)).await?;
        orders.advance_status(order.id, OrderStatus::Confirmed).await?;
        orders
            .revert_to_pending(order.id, OverrideRequest::new("manager_1", "entered on wrong table"))
            .await?;
        orders.cancel_order(order.id).await?;

        if let Err(e) = orders.cancel_order(order.id).await {
            warn!(error = %e, "Second cancel rejected");
        }
        Ok::<_, front_of_house::error::OrderError>(())
    }
    .instrument(span)
    .await?;

    let closed = orders.list_orders(&OrderFilter::closed()).await?;
    info!(closed = closed.len(), "Closed orders ready for export");

    match orders.summary().await {
        Ok(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        Err(e) => error!(error = %e, "Could not build summary"),
    }

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
