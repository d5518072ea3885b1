//! External spreadsheet store
//!
//! The roster and the behavior log both live in a spreadsheet owned by an
//! outside service. Everything that touches it goes through [`SheetStore`],
//! so the request handlers can be exercised against [`MemoryStore`].

pub mod google;
pub mod memory;

use futures::future::BoxFuture;

use crate::error::StoreError;

pub use google::{GoogleSheetsStore, ServiceAccount};
pub use memory::MemoryStore;

/// Rows as returned by a range read; trailing empty cells may be absent
pub type Rows = Vec<Vec<String>>;

/// A spreadsheet and an A1-notation range inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub range: String,
}

impl SheetTarget {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        }
    }
}

/// Narrow view of the spreadsheet service
pub trait SheetStore: Send + Sync {
    /// Read every row of `target.range`
    fn read_range<'a>(&'a self, target: &'a SheetTarget) -> BoxFuture<'a, Result<Rows, StoreError>>;

    /// Append one row after the last populated row of `target.range`,
    /// letting the store interpret values as if typed by a user
    fn append_row<'a>(
        &'a self,
        target: &'a SheetTarget,
        row: Vec<String>,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}
