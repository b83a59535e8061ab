//! Report Server - restaurant back-office financial analytics
//!
//! Read-only report builders over sales transactions, expenses and staffing,
//! served as `GET /reports/*` JSON endpoints.
//!
//! ```text
//! report-server/src/
//! ├── core/        # config, state, server, startup errors
//! ├── auth/        # JWT, role checks
//! ├── api/         # routes and handlers
//! ├── reports/     # report assemblers (ReportEngine)
//! ├── analytics/   # range resolver, keys, aggregator, metrics
//! ├── store/       # store traits + in-memory snapshot store
//! └── utils/       # logger, time, clock
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod core;
pub mod reports;
pub mod store;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use reports::{RangeQuery, ReportEngine, ReportError};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

// Security logging macro - key = value pairs go straight to tracing
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
