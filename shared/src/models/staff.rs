//! Staff Member Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Staff member as seen by cost projections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_salary: Decimal,
    #[serde(default)]
    pub status: RecordStatus,
}

impl StaffMember {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}
