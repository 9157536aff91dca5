//! Order lifecycle handling inside the order store actor.

mod actions;
pub mod entity;

pub use actions::*;
