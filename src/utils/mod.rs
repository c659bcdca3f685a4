// src/utils/mod.rs

pub mod aggregate;
pub mod fetch;
pub mod resolve;

#[cfg(test)]
pub mod stub;

pub use aggregate::aggregate;
pub use fetch::{fetch_all_neurons, fetch_prices, HttpApi, TaoStatsApi};
pub use resolve::{resolve, resolve_with_roster};
