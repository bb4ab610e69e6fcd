//! Profile upsert
//!
//! Profiles are one per employee and keyed by `employeeId`, so a PUT either
//! updates the existing row or creates it.

use serde_json::Value;
use ss_contracts::{Contract, SingleLineContract};
use ss_core::error::SsResult;
use ss_core::types::Record;
use ss_store::Table;
use tracing::info;

use crate::records::RecordService;
use crate::set_attributes::timestamp;

impl RecordService {
    /// Create or update the profile of `employee_id`, stamping `lastUpdated`
    pub async fn upsert_profile(&self, employee_id: &str, mut profile: Record) -> SsResult<Record> {
        profile.insert("employeeId".into(), Value::from(employee_id));
        profile.insert("lastUpdated".into(), Value::from(timestamp()));
        SingleLineContract::new(Table::Profiles).validate(&profile)?;

        let saved = self
            .store
            .upsert_record(Table::Profiles, employee_id, profile)
            .await?;
        info!(employee_id, "Profile saved");
        Ok(saved)
    }
}
