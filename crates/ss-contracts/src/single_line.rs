//! Line-break contract
//!
//! Table rows are single lines on disk, so a stored value may not contain a
//! line break. Fields outside the table's columns are never written and are
//! not checked.

use ss_core::error::ValidationErrors;
use ss_core::types::{field_text, Record};
use ss_store::Table;

use crate::base::{Contract, ValidationResult};

pub struct SingleLineContract {
    table: Table,
}

impl SingleLineContract {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

impl Contract<Record> for SingleLineContract {
    fn validate(&self, entity: &Record) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        for field in self.table.headers() {
            let Some(value) = entity.get(*field) else {
                continue;
            };
            if field_text(value).contains(['\n', '\r']) {
                errors.add(*field, format!("Field {} must not contain line breaks", field));
            }
        }
        errors.into_result()
    }
}
