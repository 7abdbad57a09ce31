//! CLI command handlers. Each command is in its own file.

mod analyze;
mod diff;
mod rules;

pub use analyze::run_analyze;
pub use diff::run_diff;
pub use rules::run_rules;
