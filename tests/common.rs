#![allow(dead_code)]
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc, Mutex,
};

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use behavior_tracker::{
    create_router,
    error::ClientError,
    models::LogEntry,
    services::{LogAppender, RosterFetcher},
    sheets::{MemoryStore, SheetTarget},
    tracker::{Clock, LogSink},
    AppState,
};
use futures::future::{self, BoxFuture};
use serde_json::Value;
use tower::ServiceExt;

pub fn roster_target() -> SheetTarget {
    SheetTarget::new("test-sheet", "Sheet1!F2:F")
}

pub fn log_target() -> SheetTarget {
    SheetTarget::new("test-sheet", "Log!A:D")
}

/// Store whose roster range holds one cell per name; `""` makes an empty cell
pub fn store_with_roster(names: &[&str]) -> Arc<MemoryStore> {
    let rows = names
        .iter()
        .map(|name| if name.is_empty() { Vec::new() } else { vec![name.to_string()] })
        .collect();
    Arc::new(MemoryStore::new().with_rows(&roster_target(), rows))
}

pub fn router(store: Arc<MemoryStore>) -> Router {
    let roster = RosterFetcher::new(store.clone(), roster_target());
    let log_appender = LogAppender::new(store, log_target());
    let state = AppState::new(roster, log_appender);
    create_router(Arc::new(state))
}

/// Send one request through the router and decode the JSON answer
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Clock moved by hand
#[derive(Clone, Default)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn set(&self, millis: i64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sink that remembers every entry it is handed
#[derive(Clone, Default)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

/// Sink whose requests never complete
#[derive(Clone, Default)]
pub struct HangingSink;

impl LogSink for HangingSink {
    fn submit(&self, _entry: LogEntry) -> BoxFuture<'static, Result<(), ClientError>> {
        Box::pin(future::pending())
    }
}

impl LogSink for RecordingSink {
    fn submit(&self, entry: LogEntry) -> BoxFuture<'static, Result<(), ClientError>> {
        self.entries.lock().unwrap().push(entry);
        Box::pin(future::ready(Ok(())))
    }
}
