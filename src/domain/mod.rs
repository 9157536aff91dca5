pub mod filter;
pub mod order;
pub mod status;
pub mod summary;

pub use filter::*;
pub use order::*;
pub use status::*;
pub use summary::*;
