// src/models/neuron.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NeuronError;

/// Scaling factor from RAO to whole alpha tokens.
pub const RAO_TO_TOKEN: f64 = 1e-9;

/// One roster entry as returned by the metagraph endpoint.
///
/// Amounts are kept raw so that a single bad field only fails the neuron
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeuronRecord {
    pub uid: i64,
    #[serde(default)]
    pub daily_reward: Value,
    #[serde(default)]
    pub alpha_stake: Value,
}

impl NeuronRecord {
    pub fn new(uid: i64, daily_reward: impl Into<Value>, alpha_stake: impl Into<Value>) -> Self {
        Self {
            uid,
            daily_reward: daily_reward.into(),
            alpha_stake: alpha_stake.into(),
        }
    }
}

/// Converted figures of a neuron that was found in the roster.
///
/// Tao and USD figures are `None` when the rate they depend on is
/// unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuronMetrics {
    pub uid: i64,
    pub daily_alpha_token: f64,
    pub stake_alpha_token: f64,
    pub daily_tao: Option<f64>,
    pub stake_tao: Option<f64>,
    #[serde(rename = "dailyUSD")]
    pub daily_usd: Option<f64>,
    #[serde(rename = "stakeUSD")]
    pub stake_usd: Option<f64>,
}

/// Outcome of resolving one requested uid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedNeuron {
    Resolved(NeuronMetrics),
    Failed { uid: i64, error: NeuronError },
}

impl ResolvedNeuron {
    pub fn uid(&self) -> i64 {
        match self {
            ResolvedNeuron::Resolved(m) => m.uid,
            ResolvedNeuron::Failed { uid, .. } => *uid,
        }
    }

    pub fn metrics(&self) -> Option<&NeuronMetrics> {
        match self {
            ResolvedNeuron::Resolved(m) => Some(m),
            ResolvedNeuron::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&NeuronError> {
        match self {
            ResolvedNeuron::Resolved(_) => None,
            ResolvedNeuron::Failed { error, .. } => Some(error),
        }
    }
}
