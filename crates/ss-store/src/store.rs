//! File-backed record store
//!
//! One CSV file per table. Every mutation is a full read-modify-write cycle:
//! load all rows, change them in memory, write the whole file back.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use ss_core::types::{field_equals, field_text, Record};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::csv::{format_line, parse_document};
use crate::error::{StoreError, StoreResult};
use crate::schema::Table;

/// Record store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the table files
    pub data_dir: PathBuf,
    /// Fail reads on rows whose field count differs from the header
    pub strict_rows: bool,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            strict_rows: false,
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict_rows = true;
        self
    }
}

impl From<&ss_core::config::StorageConfig> for StoreConfig {
    fn from(config: &ss_core::config::StorageConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            strict_rows: config.strict_rows,
        }
    }
}

/// Result of a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_id: String,
    #[serde(skip)]
    pub removed: usize,
}

/// CSV record store
pub struct RecordStore {
    config: StoreConfig,
    /// Serialises read-modify-write cycles per table within this process
    locks: HashMap<Table, Mutex<()>>,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        let locks = Table::ALL
            .into_iter()
            .map(|table| (table, Mutex::new(())))
            .collect();
        Self { config, locks }
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.config.data_dir.join(table.file_name())
    }

    /// Create the data directory and a header-only file for every missing table
    pub async fn ensure_tables(&self) -> StoreResult<()> {
        let dir = &self.config.data_dir;
        fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::io(dir, e))?;

        for table in Table::ALL {
            let path = self.table_path(table);
            let exists = fs::try_exists(&path)
                .await
                .map_err(|e| StoreError::io(&path, e))?;
            if !exists {
                let content = format!("{}\n", format_line(table.headers()));
                fs::write(&path, content)
                    .await
                    .map_err(|e| StoreError::io(&path, e))?;
                info!(table = %table, path = ?path, "Created empty table file");
            }
        }
        Ok(())
    }

    /// Read every well-formed row of a table
    #[instrument(skip(self, table), fields(table = %table))]
    pub async fn read_table(&self, table: Table) -> StoreResult<Vec<Record>> {
        let path = self.table_path(table);
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        let document = parse_document(&content);
        let expected = document.headers.len();
        let mut records = Vec::with_capacity(document.rows.len());

        for row in document.rows {
            if row.fields.len() != expected {
                if self.config.strict_rows {
                    return Err(StoreError::MalformedRow {
                        file: table.file_name(),
                        line: row.line,
                        expected,
                        found: row.fields.len(),
                    });
                }
                warn!(
                    line = row.line,
                    expected,
                    found = row.fields.len(),
                    "Skipping malformed row"
                );
                continue;
            }

            let record: Record = document
                .headers
                .iter()
                .cloned()
                .zip(row.fields.into_iter().map(Value::String))
                .collect();
            records.push(record);
        }

        debug!(count = records.len(), "Table read");
        Ok(records)
    }

    /// Rows whose parent key equals `value`
    pub async fn read_by_parent(&self, table: Table, value: &str) -> StoreResult<Vec<Record>> {
        let Some(field) = table.parent_field() else {
            return Ok(Vec::new());
        };
        let records = self.read_table(table).await?;
        Ok(records
            .into_iter()
            .filter(|record| field_equals(record, field, value))
            .collect())
    }

    /// First row whose primary key equals `key`
    pub async fn find_record(&self, table: Table, key: &str) -> StoreResult<Option<Record>> {
        let records = self.read_table(table).await?;
        Ok(records
            .into_iter()
            .find(|record| field_equals(record, table.key_field(), key)))
    }

    /// Replace the table's contents. An empty slice leaves the file untouched.
    pub async fn write_table(&self, table: Table, records: &[Record]) -> StoreResult<()> {
        let _guard = self.locks[&table].lock().await;
        self.write_unlocked(table, records).await
    }

    /// Append a record and rewrite the file; the record is returned unchanged
    #[instrument(skip(self, table, record), fields(table = %table))]
    pub async fn add_record(&self, table: Table, record: Record) -> StoreResult<Record> {
        let _guard = self.locks[&table].lock().await;

        let mut records = self.read_table(table).await?;
        records.push(record.clone());
        self.write_unlocked(table, &records).await?;

        info!(
            key = %record.get(table.key_field()).map(field_text).unwrap_or_default(),
            "Record added"
        );
        Ok(record)
    }

    /// Shallow-merge `patch` over the record keyed by `id`; patch wins on conflicts
    #[instrument(skip(self, table, patch), fields(table = %table))]
    pub async fn update_record(&self, table: Table, id: &str, patch: Record) -> StoreResult<Record> {
        let _guard = self.locks[&table].lock().await;

        let mut records = self.read_table(table).await?;
        let existing = records
            .iter_mut()
            .find(|record| field_equals(record, table.key_field(), id))
            .ok_or_else(|| StoreError::NotFound {
                id: id.to_string(),
                file: table.file_name(),
            })?;

        existing.extend(patch);
        let merged = existing.clone();
        self.write_unlocked(table, &records).await?;

        info!(id, "Record updated");
        Ok(merged)
    }

    /// Merge `patch` into the record keyed by `key`, or append it if there is none.
    ///
    /// Lookup and write happen under one table lock, so concurrent upserts of
    /// the same key never produce two rows.
    #[instrument(skip(self, table, patch), fields(table = %table))]
    pub async fn upsert_record(&self, table: Table, key: &str, patch: Record) -> StoreResult<Record> {
        let _guard = self.locks[&table].lock().await;

        let mut records = self.read_table(table).await?;
        let position = records
            .iter()
            .position(|record| field_equals(record, table.key_field(), key));
        let saved = match position {
            Some(index) => {
                records[index].extend(patch);
                records[index].clone()
            }
            None => {
                records.push(patch.clone());
                info!(key, "Record created by upsert");
                patch
            }
        };
        self.write_unlocked(table, &records).await?;

        Ok(saved)
    }

    /// Remove every record keyed by `id`
    #[instrument(skip(self, table), fields(table = %table))]
    pub async fn delete_record(&self, table: Table, id: &str) -> StoreResult<DeleteOutcome> {
        let _guard = self.locks[&table].lock().await;

        let records = self.read_table(table).await?;
        let before = records.len();
        let remaining: Vec<Record> = records
            .into_iter()
            .filter(|record| !field_equals(record, table.key_field(), id))
            .collect();

        if remaining.len() == before {
            return Err(StoreError::NotFound {
                id: id.to_string(),
                file: table.file_name(),
            });
        }

        self.write_unlocked(table, &remaining).await?;

        let removed = before - remaining.len();
        info!(id, removed, "Record deleted");
        Ok(DeleteOutcome {
            deleted_id: id.to_string(),
            removed,
        })
    }

    async fn write_unlocked(&self, table: Table, records: &[Record]) -> StoreResult<()> {
        if records.is_empty() {
            warn!(table = %table, "No records to write, leaving file untouched");
            return Ok(());
        }

        let headers = table.headers();
        let mut content = format_line(headers);
        content.push('\n');
        for record in records {
            let values = headers
                .iter()
                .map(|h| record.get(*h).map(field_text).unwrap_or_default());
            content.push_str(&format_line(values));
            content.push('\n');
        }

        let path = self.table_path(table);
        let tmp = self.config.data_dir.join(format!(".{}.tmp", table.file_name()));
        fs::write(&tmp, content)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&path, e));
        }

        debug!(table = %table, rows = records.len(), "Table written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    async fn store_with(table: Table, content: &str) -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path()));
        fs::write(store.table_path(table), content).await.unwrap();
        (dir, store)
    }

    const SKILLS: &str = "skillId,skillName,category,employeeId,proficiencyLevel,yearsExperience,certificationStatus\n\
        SKL1,Rust,Backend,EMP001,Expert,5,None\n\
        SKL2,\"React, Hooks\",Frontend,EMP002,Intermediate,2,Certified\n\
        SKL3,Go,Backend,EMP001,Beginner,1,None\n";

    #[tokio::test]
    async fn test_read_table() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let skills = store.read_table(Table::Skills).await.unwrap();

        assert_eq!(skills.len(), 3);
        assert_eq!(skills[1]["skillName"], "React, Hooks");
        assert_eq!(skills[0]["yearsExperience"], "5");
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let content = "skillId,skillName\nSKL1,Rust\nSKL2\nSKL3,Go,extra\nSKL4,Zig\n";
        let (_dir, store) = store_with(Table::Skills, content).await;

        let skills = store.read_table(Table::Skills).await.unwrap();
        let ids: Vec<_> = skills.iter().map(|s| s["skillId"].clone()).collect();
        assert_eq!(ids, vec![json!("SKL1"), json!("SKL4")]);
    }

    #[tokio::test]
    async fn test_strict_mode_reports_malformed_row() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path()).strict());
        fs::write(store.table_path(Table::Skills), "skillId,skillName\nSKL1,Rust\nSKL2\n")
            .await
            .unwrap();

        let err = store.read_table(Table::Skills).await.unwrap_err();
        match err {
            StoreError::MalformedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!((line, expected, found), (3, 2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path()));
        let err = store.read_table(Table::Users).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn test_write_then_read_is_lossless() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path()));
        let input = vec![
            record(json!({
                "skillId": "SKL1",
                "skillName": "C, C++ and \"modern\" C",
                "category": "  Systems ",
                "employeeId": "EMP001",
                "proficiencyLevel": "Expert",
                "yearsExperience": "10",
                "certificationStatus": ""
            })),
            record(json!({
                "skillId": "SKL2",
                "skillName": "\"quoted\"",
                "category": ",",
                "employeeId": "EMP002",
                "proficiencyLevel": "Beginner",
                "yearsExperience": "0",
                "certificationStatus": "None"
            })),
        ];

        store.write_table(Table::Skills, &input).await.unwrap();
        let output = store.read_table(Table::Skills).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_write_fills_missing_fields_and_drops_unknown() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path()));
        let input = vec![record(json!({
            "skillId": "SKL1",
            "skillName": "Rust",
            "yearsExperience": 3,
            "notAColumn": "ignored"
        }))];

        store.write_table(Table::Skills, &input).await.unwrap();
        let content = fs::read_to_string(store.table_path(Table::Skills)).await.unwrap();
        assert_eq!(
            content,
            "skillId,skillName,category,employeeId,proficiencyLevel,yearsExperience,certificationStatus\n\
             SKL1,Rust,,,,3,\n"
        );
    }

    #[tokio::test]
    async fn test_write_empty_is_noop() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        store.write_table(Table::Skills, &[]).await.unwrap();

        let content = fs::read_to_string(store.table_path(Table::Skills)).await.unwrap();
        assert_eq!(content, SKILLS);
    }

    #[tokio::test]
    async fn test_add_record() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let new_skill = record(json!({
            "skillId": "SKL4",
            "skillName": "Go",
            "category": "Backend",
            "employeeId": "EMP003",
            "proficiencyLevel": "Intermediate",
            "yearsExperience": 0,
            "certificationStatus": "None"
        }));

        let returned = store.add_record(Table::Skills, new_skill.clone()).await.unwrap();
        assert_eq!(returned, new_skill);

        let skills = store.read_table(Table::Skills).await.unwrap();
        assert_eq!(skills.len(), 4);
        assert_eq!(skills[3]["skillId"], "SKL4");
        assert_eq!(skills[3]["yearsExperience"], "0");
    }

    #[tokio::test]
    async fn test_update_is_shallow_merge() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let merged = store
            .update_record(
                Table::Skills,
                "SKL3",
                record(json!({"proficiencyLevel": "Advanced", "yearsExperience": 4})),
            )
            .await
            .unwrap();

        assert_eq!(merged["proficiencyLevel"], "Advanced");
        assert_eq!(merged["yearsExperience"], 4);
        assert_eq!(merged["skillName"], "Go");

        let skills = store.read_table(Table::Skills).await.unwrap();
        assert_eq!(skills[2]["proficiencyLevel"], "Advanced");
        assert_eq!(skills[2]["category"], "Backend");
        assert_eq!(skills[0]["proficiencyLevel"], "Expert");
    }

    #[tokio::test]
    async fn test_update_matches_declared_key_only() {
        // EMP001 appears as employeeId but the skills key is skillId
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let err = store
            .update_record(Table::Skills, "EMP001", record(json!({"category": "X"})))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_leaves_file_identical() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let err = store
            .update_record(Table::Skills, "SKL999", record(json!({"category": "X"})))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Record with id SKL999 not found in skills.csv");
        let content = fs::read_to_string(store.table_path(Table::Skills)).await.unwrap();
        assert_eq!(content, SKILLS);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let outcome = store.delete_record(Table::Skills, "SKL2").await.unwrap();
        assert_eq!(outcome.deleted_id, "SKL2");
        assert_eq!(outcome.removed, 1);

        let skills = store.read_table(Table::Skills).await.unwrap();
        assert_eq!(skills.len(), 2);
        assert!(skills.iter().all(|s| s["skillId"] != "SKL2"));
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_file_identical() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;
        let err = store.delete_record(Table::Skills, "SKL999").await.unwrap_err();
        assert!(err.is_not_found());

        let content = fs::read_to_string(store.table_path(Table::Skills)).await.unwrap();
        assert_eq!(content, SKILLS);
    }

    #[tokio::test]
    async fn test_delete_last_row_leaves_file() {
        let content = "skillId,skillName,category,employeeId,proficiencyLevel,yearsExperience,certificationStatus\n\
            SKL1,Rust,Backend,EMP001,Expert,5,None\n";
        let (_dir, store) = store_with(Table::Skills, content).await;

        let outcome = store.delete_record(Table::Skills, "SKL1").await.unwrap();
        assert_eq!(outcome.deleted_id, "SKL1");
        assert_eq!(outcome.removed, 1);

        // an empty rewrite is skipped, so the row is still on disk
        let on_disk = fs::read_to_string(store.table_path(Table::Skills)).await.unwrap();
        assert_eq!(on_disk, content);
        assert_eq!(store.read_table(Table::Skills).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_creates_then_merges() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path()));
        store.ensure_tables().await.unwrap();

        let created = store
            .upsert_record(
                Table::Profiles,
                "EMP001",
                record(json!({"employeeId": "EMP001", "location": "Berlin"})),
            )
            .await
            .unwrap();
        assert_eq!(created["location"], "Berlin");

        let merged = store
            .upsert_record(
                Table::Profiles,
                "EMP001",
                record(json!({"employeeId": "EMP001", "specialization": "Data"})),
            )
            .await
            .unwrap();
        assert_eq!(merged["location"], "Berlin");
        assert_eq!(merged["specialization"], "Data");

        let profiles = store.read_table(Table::Profiles).await.unwrap();
        assert_eq!(profiles.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_keep_one_row() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(StoreConfig::new(dir.path())));
        store.ensure_tables().await.unwrap();

        let mut handles = Vec::new();
        for n in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .upsert_record(
                        Table::Profiles,
                        "EMP001",
                        record(json!({"employeeId": "EMP001", "location": format!("L{n}")})),
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rows = store.read_by_parent(Table::Profiles, "EMP001").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_read_by_parent_and_find() {
        let (_dir, store) = store_with(Table::Skills, SKILLS).await;

        let emp1 = store.read_by_parent(Table::Skills, "EMP001").await.unwrap();
        assert_eq!(emp1.len(), 2);

        let found = store.find_record(Table::Skills, "SKL2").await.unwrap();
        assert_eq!(found.unwrap()["employeeId"], "EMP002");
        assert!(store.find_record(Table::Skills, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_tables_creates_missing_only() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let store = RecordStore::new(StoreConfig::new(&data_dir));

        store.ensure_tables().await.unwrap();
        fs::write(store.table_path(Table::Skills), SKILLS).await.unwrap();
        store.ensure_tables().await.unwrap();

        for table in Table::ALL {
            assert!(store.table_path(table).exists(), "{table}");
        }
        assert_eq!(store.read_table(Table::Skills).await.unwrap().len(), 3);
        assert!(store.read_table(Table::Users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let (dir, store) = store_with(Table::Skills, SKILLS).await;
        store.delete_record(Table::Skills, "SKL1").await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "leftover {name}");
        }
    }
}
