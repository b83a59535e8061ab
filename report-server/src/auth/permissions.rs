//! Role definitions
//!
//! Reports are read-only but expose revenue and payroll figures, so they are
//! limited to management and accounting roles.

pub const ROLE_MAIN_ADMIN: &str = "main_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_ACCOUNTANT: &str = "accountant";

/// Roles allowed on every `/reports/*` endpoint
pub const REPORT_ROLES: &[&str] = &[ROLE_MAIN_ADMIN, ROLE_ADMIN, ROLE_MANAGER, ROLE_ACCOUNTANT];

pub fn can_view_reports(role: &str) -> bool {
    REPORT_ROLES.contains(&role)
}
