//! # ss-store
//!
//! Record store for SkillSphere.
//!
//! Every table is one CSV file under a data directory. Each operation reads the
//! whole file, changes the rows in memory, and writes the whole file back.
//!
//! ## Example
//!
//! ```ignore
//! use ss_store::{RecordStore, StoreConfig, Table};
//!
//! let store = RecordStore::new(StoreConfig::new("./data"));
//! store.ensure_tables().await?;
//!
//! let skills = store.read_by_parent(Table::Skills, "EMP001").await?;
//! ```

pub mod csv;
pub mod error;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use schema::Table;
pub use store::{DeleteOutcome, RecordStore, StoreConfig};

impl From<StoreError> for ss_core::SsError {
    fn from(err: StoreError) -> Self {
        ss_core::SsError::Storage(err.to_string())
    }
}
