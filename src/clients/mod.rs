//! Typed clients wrapping the resource actors.

mod order_client;

pub use order_client::*;
