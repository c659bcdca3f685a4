// src/lib.rs

//! Subnet neuron stats for a home-screen widget.
//!
//! Each cycle fetches the subnet roster and two exchange rates, converts
//! the requested neurons' rewards and stake from RAO to alpha, TAO and
//! USD, sums them and renders the result in one of three layouts.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;
pub mod widget;
