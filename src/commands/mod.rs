//! CLI command implementations.

pub mod restart;
pub mod start;
pub mod stop;
pub mod subscribe;
pub mod update;
pub mod update_cidr;
