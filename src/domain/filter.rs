use super::{Order, OrderStatus};

/// Narrows an order listing by status and/or table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub statuses: Vec<OrderStatus>,
    pub table_number: Option<u32>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        self
    }

    pub fn for_table(mut self, table_number: u32) -> Self {
        self.table_number = Some(table_number);
        self
    }

    /// Served and cancelled orders, as read by the export/report view.
    pub fn closed() -> Self {
        Self::all()
            .with_status(OrderStatus::Served)
            .with_status(OrderStatus::Cancelled)
    }

    pub fn matches(&self, order: &Order) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&order.status))
            && self.table_number.map_or(true, |table| table == order.table_number)
    }
}
