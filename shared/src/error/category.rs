//! Error category classification

use std::fmt;

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Coarse grouping of [`ErrorCode`] by thousands range
///
/// | Range | Category | Caused by |
/// |-------|----------|-----------|
/// | 0xxx | General | caller |
/// | 1xxx | Auth | caller |
/// | 2xxx | Permission | caller |
/// | 4xxx | Report | caller (bad range / parameter) |
/// | 9xxx | System | server or a record store |
///
/// Unassigned ranges fall into `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Report,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            4 => Self::Report,
            _ => Self::System,
        }
    }

    /// Whether the server, not the caller, is at fault
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Report => "report",
            Self::System => "system",
        };
        f.write_str(name)
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
