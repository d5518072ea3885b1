//! Appends behavior log entries as spreadsheet rows

use std::sync::Arc;

use tracing::info;

use crate::{
    error::LogError,
    models::{LogBehaviorRequest, LogEntry},
    sheets::{SheetStore, SheetTarget},
};

#[derive(Clone)]
pub struct LogAppender {
    store: Arc<dyn SheetStore>,
    target: SheetTarget,
}

impl LogAppender {
    pub fn new(store: Arc<dyn SheetStore>, target: SheetTarget) -> Self {
        Self { store, target }
    }

    /// Validate a raw request and append it. Nothing is written when a
    /// field is missing.
    pub async fn append_request(&self, request: LogBehaviorRequest) -> Result<(), LogError> {
        let entry = LogEntry::try_from(request)?;
        self.append(entry).await
    }

    /// Append exactly one row `[student, date, startTime, endTime]`
    pub async fn append(&self, entry: LogEntry) -> Result<(), LogError> {
        let student = entry.student().to_string();
        self.store.append_row(&self.target, entry.into_row()).await?;
        info!("Logged behavior interval for {}", student);
        Ok(())
    }
}
