//! Order status lifecycle.
//!
//! Orders move forward through `Pending -> Confirmed -> Preparing -> Ready -> Served`.
//! Any non-terminal order may be cancelled. `Served` and `Cancelled` are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an order. Variants are declared in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    /// Statuses reachable from `self` in a single step.
    pub fn successors(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Confirmed, Cancelled],
            Confirmed => &[Preparing, Cancelled],
            Preparing => &[Ready, Cancelled],
            Ready => &[Served, Cancelled],
            Served | Cancelled => &[],
        }
    }

    /// The forward step of the kitchen/service workflow, `None` once terminal.
    pub fn next(self) -> Option<OrderStatus> {
        use OrderStatus::*;
        match self {
            Pending => Some(Confirmed),
            Confirmed => Some(Preparing),
            Preparing => Some(Ready),
            Ready => Some(Served),
            Served | Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.successors().contains(&to)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
