//! Command implementations.

pub mod analyze;
pub mod calculate;
pub mod commit;
pub mod factors;
pub mod history;
pub mod summary;

pub use self::analyze::{build_analyzer, execute_analyze, CliAnalyzer};
pub use self::calculate::execute_calculate;
pub use self::commit::execute_commit;
pub use self::factors::execute_factors;
pub use self::history::execute_history;
pub use self::summary::execute_summary;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as Unix seconds.
pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
