// src/utils/fetch.rs

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;
use crate::models::{coerce_f64, ExchangeRates, NeuronRecord};

pub const METAGRAPH_PATH: &str = "/metagraph/latest/v1";
pub const POOL_PATH: &str = "/dtao/pool/v1";
pub const PRICE_PATH: &str = "/price/latest/v1";

/// Seam to the upstream stats API: one GET returning a JSON body.
#[async_trait]
pub trait TaoStatsApi: Send + Sync {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError>;
}

/// reqwest-backed client with a hard per-request timeout.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TaoStatsApi for HttpApi {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

/// Returns the `data` array of a response body.
fn data_array(body: &Value) -> Result<&Vec<Value>, FetchError> {
    body.get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Shape("`data` is missing or not an array".into()))
}

fn first_price(body: &Value) -> Result<f64, FetchError> {
    let first = data_array(body)?
        .first()
        .ok_or_else(|| FetchError::Shape("`data` is empty".into()))?;
    first
        .get("price")
        .and_then(coerce_f64)
        .ok_or_else(|| FetchError::Shape("`price` is missing or not numeric".into()))
}

async fn fetch_rate(api: &dyn TaoStatsApi, path: &str, query: &[(&str, String)]) -> Option<f64> {
    match api.get_json(path, query).await {
        Ok(body) => match first_price(&body) {
            Ok(price) => Some(price),
            Err(e) => {
                error!("Error when calling {}: {}", path, e);
                None
            }
        },
        Err(e) => {
            error!("Error when calling {}: {}", path, e);
            None
        }
    }
}

/// Fetches the alpha→TAO pool price and the TAO→USDT price.
///
/// Both requests run concurrently and fail independently; a failed one
/// leaves its rate unavailable. Never returns an error.
pub async fn fetch_prices(api: &dyn TaoStatsApi, netuid: u16) -> ExchangeRates {
    let pool_query = [("netuid", netuid.to_string())];
    let price_query = [("asset", "tao".to_string())];

    let (alpha_to_tao, tao_to_usdt) = tokio::join!(
        fetch_rate(api, POOL_PATH, &pool_query),
        fetch_rate(api, PRICE_PATH, &price_query),
    );

    ExchangeRates {
        alpha_to_tao,
        tao_to_usdt,
    }
}

/// Fetches the full roster of a subnet.
///
/// Any failure yields an empty roster, which callers must read as "no
/// data" rather than "no neurons". Entries without an integer `uid` are
/// dropped.
pub async fn fetch_all_neurons(api: &dyn TaoStatsApi, netuid: u16) -> Vec<NeuronRecord> {
    let query = [("netuid", netuid.to_string())];
    let body = match api.get_json(METAGRAPH_PATH, &query).await {
        Ok(body) => body,
        Err(e) => {
            error!("Error fetching neuron data for netuid {}: {}", netuid, e);
            return Vec::new();
        }
    };

    let entries = match data_array(&body) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Invalid metagraph response for netuid {}: {}", netuid, e);
            return Vec::new();
        }
    };

    let mut roster = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<NeuronRecord>(entry.clone()) {
            Ok(record) => roster.push(record),
            Err(e) => warn!("Skipping metagraph entry without a usable uid: {}", e),
        }
    }
    debug!("Fetched {} neurons for netuid {}", roster.len(), netuid);
    roster
}
