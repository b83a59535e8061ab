//! Authentication and authorization
//!
//! - [`jwt`] - HS256 token issue/validation, [`CurrentUser`]
//! - `extractor` - `CurrentUser` as a handler argument
//! - [`middleware`] - `require_auth` and `require_report_access` layers
//! - [`permissions`] - roles admitted to reports

mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_report_access};
