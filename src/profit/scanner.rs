//! Max Profit Scanner
//!
//! Single pass over a price sequence, tracking the cheapest price seen so far
//! and the best profit from selling at the current price after buying at it.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single buy-then-sell transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_day: usize,
    pub sell_day: usize,
    pub buy_price: u64,
    pub sell_price: u64,
}

impl Trade {
    pub fn profit(&self) -> u64 {
        self.sell_price - self.buy_price
    }

    /// Days the position is held
    pub fn holding_days(&self) -> usize {
        self.sell_day - self.buy_day
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "buy day {} @ {} → sell day {} @ {} (+{})",
            self.buy_day,
            self.buy_price,
            self.sell_day,
            self.sell_price,
            self.profit()
        )
    }
}

/// Incremental max-profit scan. Feed prices in day order with `observe`.
#[derive(Debug, Clone)]
pub struct MaxProfitScanner {
    min_price: u64,
    min_day: usize,
    max_profit: u64,
    best: Option<Trade>,
    days: usize,
}

impl MaxProfitScanner {
    pub fn new() -> Self {
        Self {
            min_price: u64::MAX,
            min_day: 0,
            max_profit: 0,
            best: None,
            days: 0,
        }
    }

    /// Scan a whole sequence
    pub fn scan(prices: &[u64]) -> Self {
        let mut scanner = Self::new();
        for &price in prices {
            scanner.observe(price);
        }
        scanner
    }

    /// Process the next day's price
    pub fn observe(&mut self, price: u64) {
        let day = self.days;
        self.days += 1;

        if price < self.min_price {
            self.min_price = price;
            self.min_day = day;
            return;
        }

        // price >= min_price here, so no underflow
        let profit = price - self.min_price;
        if profit > self.max_profit {
            self.max_profit = profit;
            self.best = Some(Trade {
                buy_day: self.min_day,
                sell_day: day,
                buy_price: self.min_price,
                sell_price: price,
            });
            debug!(day, profit, "New best profit");
        }
    }

    pub fn max_profit(&self) -> u64 {
        self.max_profit
    }

    /// Earliest transaction achieving `max_profit`, if any profit exists
    pub fn best_trade(&self) -> Option<Trade> {
        self.best
    }

    pub fn days_observed(&self) -> usize {
        self.days
    }
}

impl Default for MaxProfitScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Maximum profit from one buy and a strictly later sell, or 0.
pub fn max_profit(prices: &[u64]) -> u64 {
    MaxProfitScanner::scan(prices).max_profit()
}

pub fn best_trade(prices: &[u64]) -> Option<Trade> {
    MaxProfitScanner::scan(prices).best_trade()
}
