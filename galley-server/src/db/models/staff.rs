//! Staff Model
//!
//! Read-only view of the staff directory. Credential handling lives with
//! the external auth collaborator.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::order::StaffRole;
use surrealdb::RecordId;

/// Table name for staff records
pub const STAFF_TABLE: &str = "staff";

/// Staff directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub role: StaffRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Staff {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create payload (seeding and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub name: String,
    pub role: StaffRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}
