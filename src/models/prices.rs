// src/models/prices.rs

use serde::Serialize;

/// The two conversion rates of one refresh cycle.
///
/// `None` marks a rate that could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRates {
    /// Price of one alpha token in TAO.
    pub alpha_to_tao: Option<f64>,
    /// Price of one TAO in USDT.
    pub tao_to_usdt: Option<f64>,
}

impl ExchangeRates {
    pub fn new(alpha_to_tao: f64, tao_to_usdt: f64) -> Self {
        Self {
            alpha_to_tao: Some(alpha_to_tao),
            tao_to_usdt: Some(tao_to_usdt),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.alpha_to_tao.is_some() && self.tao_to_usdt.is_some()
    }

    /// Alpha tokens per TAO, the inverse of `alpha_to_tao`.
    ///
    /// `None` when the rate is missing or not positive.
    pub fn tao_to_alpha(&self) -> Option<f64> {
        self.alpha_to_tao.filter(|r| *r > 0.0).map(|r| 1.0 / r)
    }
}
