// src/pipeline.rs

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::models::{Snapshot, WidgetParams};
use crate::utils::{aggregate, fetch_all_neurons, fetch_prices, resolve_with_roster, TaoStatsApi};

/// Runs one refresh cycle: rates and roster in parallel, then join,
/// convert and sum.
///
/// Never fails; upstream problems show up as unavailable rates and failed
/// neurons in the returned snapshot.
pub async fn run_cycle(
    api: &dyn TaoStatsApi,
    params: &WidgetParams,
    now: DateTime<Utc>,
    refresh_interval: Duration,
) -> Snapshot {
    let (rates, roster) = tokio::join!(
        fetch_prices(api, params.netuid),
        fetch_all_neurons(api, params.netuid),
    );

    let mut neurons = resolve_with_roster(&roster, &params.uids, &rates);
    neurons.sort_by_key(|n| n.uid());
    let totals = aggregate(&neurons);

    let snapshot = Snapshot {
        netuid: params.netuid,
        uids: params.uids.clone(),
        rates,
        neurons,
        totals,
        updated_at: now,
        refresh_after: refresh_after(now, refresh_interval),
    };

    info!(
        "Cycle for netuid {}: {} of {} neurons resolved, alpha->tao {}, tao->usdt {}",
        snapshot.netuid,
        snapshot.resolved_count(),
        snapshot.neurons.len(),
        availability(snapshot.rates.alpha_to_tao),
        availability(snapshot.rates.tao_to_usdt),
    );
    if !snapshot.rates.is_complete() {
        warn!(
            "Exchange rates incomplete for netuid {}; converted figures are unavailable",
            snapshot.netuid
        );
    }
    snapshot
}

/// `now + interval`, saturating at the latest representable time.
fn refresh_after(now: DateTime<Utc>, interval: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(interval)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn availability(rate: Option<f64>) -> &'static str {
    if rate.is_some() {
        "ok"
    } else {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExchangeRates, Totals};
    use crate::utils::fetch::{METAGRAPH_PATH, POOL_PATH, PRICE_PATH};
    use crate::utils::stub::StubApi;
    use chrono::TimeZone;
    use serde_json::json;

    fn upstream() -> StubApi {
        StubApi::new()
            .with(
                METAGRAPH_PATH,
                json!({ "data": [
                    { "uid": 1, "daily_reward": "1000000000", "alpha_stake": "2000000000" },
                    { "uid": 4, "daily_reward": "3000000000", "alpha_stake": "4000000000" },
                ] }),
            )
            .with(POOL_PATH, json!({ "data": [{ "price": 0.01 }] }))
            .with(PRICE_PATH, json!({ "data": [{ "price": 300 }] }))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn builds_sorted_snapshot_with_totals() {
        let api = upstream();
        let params = WidgetParams::parse("16 | 4, 2, 1").unwrap();

        let snapshot = run_cycle(&api, &params, now(), Duration::from_secs(300)).await;

        assert_eq!(snapshot.netuid, 16);
        assert_eq!(snapshot.uids, vec![4, 2, 1]);
        assert_eq!(snapshot.rates, ExchangeRates::new(0.01, 300.0));
        let order: Vec<i64> = snapshot.neurons.iter().map(|n| n.uid()).collect();
        assert_eq!(order, vec![1, 2, 4]);
        assert!(snapshot.neurons[1].error().is_some());
        assert_eq!(snapshot.resolved_count(), 2);

        assert!((snapshot.totals.daily_total_alpha_token - 4.0).abs() < 1e-9);
        assert!((snapshot.totals.stake_total_usd.unwrap() - 18.0).abs() < 1e-9);
        assert_eq!(snapshot.updated_at, now());
        assert_eq!(snapshot.refresh_after, now() + chrono::Duration::seconds(300));

        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn total_upstream_failure_still_yields_a_snapshot() {
        let api = StubApi::new();
        let params = WidgetParams::parse("16 | 1, 2").unwrap();

        let snapshot = run_cycle(&api, &params, now(), Duration::from_secs(60)).await;

        assert_eq!(snapshot.neurons.len(), 2);
        assert_eq!(snapshot.rates, ExchangeRates::unavailable());
        assert!(!snapshot.rates.is_complete());
        assert_eq!(snapshot.totals, Totals::zero());
        assert!(snapshot.is_empty_of_data());
    }

    #[tokio::test]
    async fn huge_refresh_interval_does_not_panic() {
        let api = upstream();
        let params = WidgetParams::parse("16 | 1").unwrap();

        let snapshot = run_cycle(
            &api,
            &params,
            now(),
            Duration::from_secs(10_000_000_000_000_000),
        )
        .await;

        assert_eq!(snapshot.refresh_after, DateTime::<Utc>::MAX_UTC);
        assert_eq!(snapshot.resolved_count(), 1);
    }

    #[tokio::test]
    async fn snapshot_serializes_with_camel_case_fields() {
        let api = upstream();
        let params = WidgetParams::parse("16 | 1").unwrap();
        let snapshot = run_cycle(&api, &params, now(), Duration::from_secs(300)).await;

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["rates"]["taoToUsdt"], json!(300.0));
        assert!(value["totals"]["stakeTotalUSD"].is_number());
        assert_eq!(value["neurons"][0]["uid"], json!(1));
        assert!(value["refreshAfter"].is_string());
    }
}
