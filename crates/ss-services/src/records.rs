//! Record service: the facade's view of the record store

use std::sync::Arc;

use ss_contracts::{Contract, CreateRecordContract, SingleLineContract};
use ss_core::error::{SsError, SsResult};
use ss_core::types::Record;
use ss_store::{DeleteOutcome, RecordStore, Table};
use tracing::debug;

use crate::set_attributes::{apply_create_defaults, apply_update_stamps, assign_key};

/// CRUD operations over any declared table
#[derive(Clone)]
pub struct RecordService {
    pub(crate) store: Arc<RecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub async fn list(&self, table: Table) -> SsResult<Vec<Record>> {
        Ok(self.store.read_table(table).await?)
    }

    /// All rows owned by `parent` through the table's parent key
    pub async fn list_by_parent(&self, table: Table, parent: &str) -> SsResult<Vec<Record>> {
        let records = self.store.read_by_parent(table, parent).await?;
        debug!(table = %table, parent, count = records.len(), "Filtered by parent");
        Ok(records)
    }

    /// Single row by primary key, or `NotFound`
    pub async fn find(&self, table: Table, key: &str) -> SsResult<Record> {
        self.store
            .find_record(table, key)
            .await?
            .ok_or_else(|| SsError::not_found(table.entity(), key))
    }

    /// Generate the key if absent, check required fields, fill defaults, append
    pub async fn create(&self, table: Table, mut record: Record) -> SsResult<Record> {
        assign_key(table, &mut record);
        CreateRecordContract::new(table).validate(&record)?;
        SingleLineContract::new(table).validate(&record)?;
        apply_create_defaults(table, &mut record);

        Ok(self.store.add_record(table, record).await?)
    }

    pub async fn update(&self, table: Table, id: &str, mut patch: Record) -> SsResult<Record> {
        SingleLineContract::new(table).validate(&patch)?;
        apply_update_stamps(table, &mut patch);
        Ok(self.store.update_record(table, id, patch).await?)
    }

    pub async fn delete(&self, table: Table, id: &str) -> SsResult<DeleteOutcome> {
        Ok(self.store.delete_record(table, id).await?)
    }
}
