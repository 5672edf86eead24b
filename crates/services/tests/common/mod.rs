#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use services::{ApiClient, ApiError, ApiResult};

/// Scripted gateway stub: exact-path responses, recorded POST bodies.
/// Unscripted endpoints fail like an unreachable server.
#[derive(Default)]
pub struct StubApi {
    responses: Mutex<HashMap<String, Value>>,
    sent: Mutex<Vec<(String, Value)>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: &str, value: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), value);
        self
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }

    fn lookup(&self, endpoint: &str) -> ApiResult<Value> {
        self.responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .ok_or(ApiError)
    }
}

#[async_trait]
impl ApiClient for StubApi {
    async fn get(&self, endpoint: &str) -> ApiResult<Value> {
        self.lookup(endpoint)
    }

    async fn post(&self, endpoint: &str, body: &Value) -> ApiResult<Value> {
        self.sent
            .lock()
            .unwrap()
            .push((endpoint.to_string(), body.clone()));
        self.lookup(endpoint)
    }
}

/// Stub whose first `/recommendations` GET parks until released, so a test
/// can overtake an in-flight call with a newer one.
pub struct GatedApi {
    inner: StubApi,
    gate: Notify,
    armed: AtomicBool,
}

impl GatedApi {
    pub fn new(inner: StubApi) -> Self {
        Self {
            inner,
            gate: Notify::new(),
            armed: AtomicBool::new(true),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ApiClient for GatedApi {
    async fn get(&self, endpoint: &str) -> ApiResult<Value> {
        if endpoint.starts_with("/recommendations") && self.armed.swap(false, Ordering::SeqCst) {
            self.gate.notified().await;
        }
        self.inner.get(endpoint).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> ApiResult<Value> {
        self.inner.post(endpoint, body).await
    }
}
