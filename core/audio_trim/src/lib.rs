pub mod error;
pub mod filter;
pub mod host;
pub mod position;
pub mod signal;
pub mod units;
