// src/utils/aggregate.rs

use crate::models::{ResolvedNeuron, Totals};

/// Sums the figures of every resolved neuron; failed entries are skipped.
pub fn aggregate(neurons: &[ResolvedNeuron]) -> Totals {
    neurons
        .iter()
        .filter_map(ResolvedNeuron::metrics)
        .fold(Totals::zero(), |acc, m| acc.add(m))
}
