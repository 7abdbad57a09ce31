//! Per-group append-only history.

use serde::Serialize;

use crate::har::SimplifiedCapture;
use crate::knowledge::KnowledgeReport;

/// Parallel histories of one group: entry `i` of each came from the same call.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub analyzed_data: Vec<SimplifiedCapture>,
    pub knowledge_data: Vec<KnowledgeReport>,
}

impl Group {
    pub(super) fn record(&mut self, capture: SimplifiedCapture, report: KnowledgeReport) {
        self.analyzed_data.push(capture);
        self.knowledge_data.push(report);
    }

    /// Number of analyses recorded.
    pub fn len(&self) -> usize {
        self.knowledge_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knowledge_data.is_empty()
    }

    /// Most recent knowledge report, if any.
    pub fn latest(&self) -> Option<&KnowledgeReport> {
        self.knowledge_data.last()
    }
}
