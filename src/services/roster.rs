//! Student roster lookup

use std::sync::Arc;

use tracing::debug;

use crate::{
    error::StoreError,
    sheets::{Rows, SheetStore, SheetTarget},
};

/// Reads the roster column of the configured spreadsheet
#[derive(Clone)]
pub struct RosterFetcher {
    store: Arc<dyn SheetStore>,
    target: SheetTarget,
}

impl RosterFetcher {
    pub fn new(store: Arc<dyn SheetStore>, target: SheetTarget) -> Self {
        Self { store, target }
    }

    /// Student names in sheet order. Empty cells are skipped, duplicates kept.
    pub async fn fetch(&self) -> Result<Vec<String>, StoreError> {
        let rows = self.store.read_range(&self.target).await?;
        let students = first_column(rows);
        debug!("Fetched {} students from {}", students.len(), self.target.range);
        Ok(students)
    }
}

fn first_column(rows: Rows) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.into_iter().next())
        .filter(|name| !name.is_empty())
        .collect()
}
