// src/models/mod.rs

pub mod neuron;
pub mod params;
pub mod prices;
pub mod totals;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub use neuron::{NeuronMetrics, NeuronRecord, ResolvedNeuron, RAO_TO_TOKEN};
pub use params::WidgetParams;
pub use prices::ExchangeRates;
pub use totals::Totals;

/// Everything one refresh cycle produced, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub netuid: u16,
    pub uids: Vec<i64>,
    pub rates: ExchangeRates,
    pub neurons: Vec<ResolvedNeuron>,
    pub totals: Totals,
    pub updated_at: DateTime<Utc>,
    pub refresh_after: DateTime<Utc>,
}

impl Snapshot {
    pub fn resolved_count(&self) -> usize {
        self.neurons.iter().filter(|n| n.metrics().is_some()).count()
    }

    /// True when nothing usable came back from upstream.
    pub fn is_empty_of_data(&self) -> bool {
        self.resolved_count() == 0 && self.rates.alpha_to_tao.is_none() && self.rates.tao_to_usdt.is_none()
    }
}

/// Coerces a JSON number or numeric string to a finite `f64`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
