//! rho-scan
//!
//! Two standalone exercises:
//! - `profit`: best single buy/sell profit over a price sequence
//! - `list`: where a singly linked list's cycle begins (Floyd)

pub mod config;
pub mod crosscheck;
pub mod list;
pub mod profit;
