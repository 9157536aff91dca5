//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod front_of_house;
pub mod tracing;

pub use config::*;
pub use front_of_house::*;
pub use self::tracing::*;
