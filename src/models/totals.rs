// src/models/totals.rs

use serde::Serialize;

use super::NeuronMetrics;

/// Running sums over every resolved neuron of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub daily_total_alpha_token: f64,
    pub stake_total_alpha_token: f64,
    pub daily_total_tao: Option<f64>,
    pub stake_total_tao: Option<f64>,
    #[serde(rename = "dailyTotalUSD")]
    pub daily_total_usd: Option<f64>,
    #[serde(rename = "stakeTotalUSD")]
    pub stake_total_usd: Option<f64>,
}

impl Totals {
    pub fn zero() -> Self {
        Self {
            daily_total_alpha_token: 0.0,
            stake_total_alpha_token: 0.0,
            daily_total_tao: Some(0.0),
            stake_total_tao: Some(0.0),
            daily_total_usd: Some(0.0),
            stake_total_usd: Some(0.0),
        }
    }

    /// Adds one neuron's figures. A missing figure makes the matching
    /// total unavailable.
    pub fn add(mut self, m: &NeuronMetrics) -> Self {
        self.daily_total_alpha_token += m.daily_alpha_token;
        self.stake_total_alpha_token += m.stake_alpha_token;
        self.daily_total_tao = sum(self.daily_total_tao, m.daily_tao);
        self.stake_total_tao = sum(self.stake_total_tao, m.stake_tao);
        self.daily_total_usd = sum(self.daily_total_usd, m.daily_usd);
        self.stake_total_usd = sum(self.stake_total_usd, m.stake_usd);
        self
    }
}

impl Default for Totals {
    fn default() -> Self {
        Self::zero()
    }
}

fn sum(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    acc.zip(value).map(|(a, b)| a + b)
}
