//! Port traits consumed by the domain, implemented by adapters.

pub mod config_port;
pub mod data_port;
pub mod fundamentals_port;
