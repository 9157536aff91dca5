//! # Front of House
//!
//! Order lifecycle service for a restaurant front-of-house dashboard.
//!
//! Orders live in a single store actor ([`actor_framework::ResourceActor`]) that
//! is the only mutator. The presentation layer talks to it through a cloneable
//! [`clients::OrderClient`]:
//!
//! - create an order (`pending`, total derived from its items)
//! - advance it along `pending -> confirmed -> preparing -> ready -> served`
//! - cancel it while it is still open
//! - revert it to `pending` through an explicit, configurable operator override
//!
//! Illegal transitions are rejected with [`error::OrderError`] and leave the
//! stored order untouched.
//!
//! ```no_run
//! use std::sync::Arc;
//! use front_of_house::app_system::{FrontOfHouse, SystemConfig};
//! use front_of_house::domain::{OrderCreate, OrderItem, OrderStatus};
//! use front_of_house::notifications::TracingNotifier;
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let system = FrontOfHouse::new(SystemConfig::default(), Arc::new(TracingNotifier));
//! let items = vec![OrderItem::new("1", 2, Decimal::new(1299, 2))];
//! let order = system.order_client.create_order(OrderCreate::new(4, "waiter_1", items)).await?;
//! system.order_client.advance_status(order.id, OrderStatus::Confirmed).await?;
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod order_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
