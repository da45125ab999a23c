//! Price Scanner
//!
//! Responsible for:
//! - Finding the best single buy/sell profit over a price sequence in one pass
//! - Reporting which days that trade buys and sells on

mod scanner;

pub use scanner::{best_trade, max_profit, MaxProfitScanner, Trade};
