//! Create contract for records

use ss_core::error::ValidationErrors;
use ss_core::types::{is_blank, Record};
use ss_store::Table;

use crate::base::{Contract, ValidationResult};

/// Checks that every required field of a table is present before a create
pub struct CreateRecordContract {
    table: Table,
}

impl CreateRecordContract {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Fields that must be non-empty on create, in reporting order
    pub fn required_fields(table: Table) -> &'static [&'static str] {
        match table {
            Table::Users => &["name", "role"],
            Table::Employees | Table::Managers => &["name"],
            Table::Skills => &["employeeId", "skillName", "category", "proficiencyLevel"],
            Table::Projects => &["employeeId", "projectName", "role"],
            Table::Profiles => &["employeeId"],
            Table::CurrentProjects => &["employeeId", "projectName"],
            Table::CaiaUtilization => &["employeeId", "task"],
            Table::PocUtilization => &["employeeId", "title"],
        }
    }
}

impl Contract<Record> for CreateRecordContract {
    fn validate(&self, entity: &Record) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        for field in Self::required_fields(self.table) {
            if is_blank(entity, field) {
                errors.add(*field, format!("Missing required field: {}", field));
            }
        }
        errors.into_result()
    }
}
