// src/utils/stub.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::utils::fetch::TaoStatsApi;

/// In-memory upstream for tests. Paths without a canned body fail.
#[derive(Default)]
pub struct StubApi {
    bodies: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.bodies.insert(path.to_string(), body);
        self
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.bodies.remove(path);
        self
    }

    /// Requested paths with their query strings, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaoStatsApi for StubApi {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let query: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}?{}", path, query.join("&")));

        self.bodies
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Shape(format!("no route for {}", path)))
    }
}
