// src/utils/resolve.rs

use crate::error::NeuronError;
use crate::models::{coerce_f64, ExchangeRates, NeuronMetrics, NeuronRecord, ResolvedNeuron, RAO_TO_TOKEN};
use crate::utils::fetch::{fetch_all_neurons, TaoStatsApi};

/// Fetches the roster once and resolves every requested uid against it.
pub async fn resolve(
    api: &dyn TaoStatsApi,
    uids: &[i64],
    rates: &ExchangeRates,
    netuid: u16,
) -> Vec<ResolvedNeuron> {
    let roster = fetch_all_neurons(api, netuid).await;
    resolve_with_roster(&roster, uids, rates)
}

/// One output per requested uid, in request order. Duplicates are kept.
pub fn resolve_with_roster(
    roster: &[NeuronRecord],
    uids: &[i64],
    rates: &ExchangeRates,
) -> Vec<ResolvedNeuron> {
    uids.iter()
        .map(|&uid| match roster.iter().find(|record| record.uid == uid) {
            Some(record) => match convert(record, rates) {
                Ok(metrics) => ResolvedNeuron::Resolved(metrics),
                Err(error) => ResolvedNeuron::Failed { uid, error },
            },
            None => ResolvedNeuron::Failed {
                uid,
                error: NeuronError::NotFound,
            },
        })
        .collect()
}

fn convert(record: &NeuronRecord, rates: &ExchangeRates) -> Result<NeuronMetrics, NeuronError> {
    let daily_rao = coerce_f64(&record.daily_reward)
        .ok_or(NeuronError::InvalidField { field: "daily_reward" })?;
    let stake_rao = coerce_f64(&record.alpha_stake)
        .ok_or(NeuronError::InvalidField { field: "alpha_stake" })?;

    let daily_alpha_token = daily_rao * RAO_TO_TOKEN;
    let stake_alpha_token = stake_rao * RAO_TO_TOKEN;

    let daily_tao = rates.alpha_to_tao.map(|r| daily_alpha_token * r);
    let stake_tao = rates.alpha_to_tao.map(|r| stake_alpha_token * r);

    let daily_usd = daily_tao.zip(rates.tao_to_usdt).map(|(tao, r)| tao * r);
    let stake_usd = stake_tao.zip(rates.tao_to_usdt).map(|(tao, r)| tao * r);

    Ok(NeuronMetrics {
        uid: record.uid,
        daily_alpha_token,
        stake_alpha_token,
        daily_tao,
        stake_tao,
        daily_usd,
        stake_usd,
    })
}
