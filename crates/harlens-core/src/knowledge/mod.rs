//! Issue aggregation: flat validator issues to a rule-indexed knowledge report.
//!
//! Every enabled rule appears exactly once in a report, either with its
//! issues or as `resolved`, so two reports can be compared rule by rule
//! without a separate list of enabled rules.

mod build;
mod diff;
mod model;

pub use build::{aggregate, build_knowledge, no_network_report};
pub use diff::{diff_reports, ChangeKind, RuleChange};
pub use model::{
    IssueMap, KnowledgeReport, RawIssue, RuleBucket, Severity, CATEGORY_STANDARD,
    NO_NETWORK_RULE, TEST_KIND,
};
