//! In-memory spreadsheet used as a stand-in for the remote service

use std::{
    collections::HashMap,
    sync::Mutex,
};

use futures::future::{self, BoxFuture};

use super::{Rows, SheetStore, SheetTarget};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    ranges: Mutex<HashMap<(String, String), Rows>>,
    outage: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `target` with `rows`, replacing whatever was there
    pub fn with_rows(self, target: &SheetTarget, rows: Rows) -> Self {
        if let Ok(mut ranges) = self.ranges.lock() {
            ranges.insert(key(target), rows);
        }
        self
    }

    /// Current rows of `target`, empty when nothing was written
    pub fn rows(&self, target: &SheetTarget) -> Rows {
        self.ranges
            .lock()
            .ok()
            .and_then(|ranges| ranges.get(&key(target)).cloned())
            .unwrap_or_default()
    }

    /// Make every following call fail until [`MemoryStore::recover`]
    pub fn fail(&self, reason: impl Into<String>) {
        if let Ok(mut outage) = self.outage.lock() {
            *outage = Some(reason.into());
        }
    }

    pub fn recover(&self) {
        if let Ok(mut outage) = self.outage.lock() {
            *outage = None;
        }
    }

    fn check_available(&self) -> Result<(), StoreError> {
        let outage = self
            .outage
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock store: {}", e)))?;
        match outage.as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

fn key(target: &SheetTarget) -> (String, String) {
    (target.spreadsheet_id.clone(), target.range.clone())
}

impl SheetStore for MemoryStore {
    fn read_range<'a>(
        &'a self,
        target: &'a SheetTarget,
    ) -> BoxFuture<'a, Result<Rows, StoreError>> {
        let result = self.check_available().map(|()| self.rows(target));
        Box::pin(future::ready(result))
    }

    fn append_row<'a>(
        &'a self,
        target: &'a SheetTarget,
        row: Vec<String>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        let result = self.check_available().and_then(|()| {
            let mut ranges = self
                .ranges
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("Failed to lock store: {}", e)))?;
            ranges.entry(key(target)).or_default().push(row);
            Ok(())
        });
        Box::pin(future::ready(result))
    }
}
