//! Attribute defaulting for new and updated records
//!
//! Generated ids look like `SKL_1718000000000_k3j9x0a1b`: a table prefix,
//! epoch milliseconds, and nine random base-36 characters.

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde_json::Value;
use ss_core::types::{is_blank, Record};
use ss_store::Table;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 9;

/// Value filled into an optional field left blank on create
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Zero,
    Text(&'static str),
}

impl FieldDefault {
    fn value(&self) -> Value {
        match self {
            FieldDefault::Zero => Value::from(0),
            FieldDefault::Text(text) => Value::from(*text),
        }
    }
}

/// Prefix for generated primary keys; profiles are keyed by their employee instead
pub fn id_prefix(table: Table) -> Option<&'static str> {
    match table {
        Table::Users => Some("USR"),
        Table::Employees => Some("EMP"),
        Table::Managers => Some("MGR"),
        Table::Skills => Some("SKL"),
        Table::Projects => Some("PROJ"),
        Table::Profiles => None,
        Table::CurrentProjects => Some("CP"),
        Table::CaiaUtilization => Some("CAIA"),
        Table::PocUtilization => Some("POC"),
    }
}

pub fn defaults(table: Table) -> &'static [(&'static str, FieldDefault)] {
    match table {
        Table::Employees | Table::Managers => &[
            ("totalSkills", FieldDefault::Zero),
            ("totalProjects", FieldDefault::Zero),
        ],
        Table::Skills => &[
            ("yearsExperience", FieldDefault::Zero),
            ("certificationStatus", FieldDefault::Text("None")),
        ],
        Table::Projects => &[
            ("status", FieldDefault::Text("Active")),
            ("description", FieldDefault::Text("")),
            ("duration", FieldDefault::Text("")),
        ],
        Table::Users
        | Table::Profiles
        | Table::CurrentProjects
        | Table::CaiaUtilization
        | Table::PocUtilization => &[],
    }
}

/// Tables whose rows carry `createdAt`/`updatedAt`
pub fn is_timestamped(table: Table) -> bool {
    matches!(
        table,
        Table::CurrentProjects | Table::CaiaUtilization | Table::PocUtilization
    )
}

/// Current time as RFC 3339 UTC with millisecond precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// Assign a generated key if the body did not supply one
pub fn assign_key(table: Table, record: &mut Record) {
    let key = table.key_field();
    if let Some(prefix) = id_prefix(table) {
        if is_blank(record, key) {
            record.insert(key.to_string(), Value::from(generate_id(prefix)));
        }
    }
}

/// Fill blank optional fields and creation timestamps
pub fn apply_create_defaults(table: Table, record: &mut Record) {
    for (field, default) in defaults(table) {
        if is_blank(record, field) {
            record.insert(field.to_string(), default.value());
        }
    }

    if is_timestamped(table) {
        let now = timestamp();
        record.insert("createdAt".into(), Value::from(now.clone()));
        record.insert("updatedAt".into(), Value::from(now));
    }
}

/// Stamp modification time on an update patch
pub fn apply_update_stamps(table: Table, patch: &mut Record) {
    if is_timestamped(table) {
        patch.insert("updatedAt".into(), Value::from(timestamp()));
    }
}
