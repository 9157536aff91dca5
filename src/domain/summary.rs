use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{Order, OrderStatus};

/// Session totals for the reporting view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub by_status: BTreeMap<OrderStatus, usize>,
    pub open_orders: usize,
    pub served_revenue: Decimal,
    pub average_served_ticket: Option<Decimal>,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut by_status: BTreeMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|status| (*status, 0)).collect();
        let mut served_revenue = Decimal::ZERO;
        let mut served = 0usize;

        for order in orders {
            *by_status.entry(order.status).or_default() += 1;
            if order.status == OrderStatus::Served {
                served += 1;
                served_revenue += order.total_amount();
            }
        }

        let average_served_ticket = (served > 0)
            .then(|| (served_revenue / Decimal::from(served)).round_dp(2));

        Self {
            open_orders: orders.iter().filter(|order| order.is_open()).count(),
            by_status,
            served_revenue,
            average_served_ticket,
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
