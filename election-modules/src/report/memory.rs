use std::sync::Arc;

use election::{ElectionError, NodeSummary, ReportEvent, ReportSink};
use parking_lot::Mutex;

/// In-memory report sink; shareable across an in-process cluster so
/// tests can inspect the whole message flow.
#[derive(Clone, Debug, Default)]
pub struct MemoryReportSink {
	events: Arc<Mutex<Vec<ReportEvent>>>,
	summaries: Arc<Mutex<Vec<NodeSummary>>>,
}

impl MemoryReportSink {
	pub fn new() -> MemoryReportSink {
		MemoryReportSink::default()
	}

	pub fn events(&self) -> Vec<ReportEvent> {
		self.events.lock().clone()
	}

	pub fn summaries(&self) -> Vec<NodeSummary> {
		self.summaries.lock().clone()
	}
}

impl ReportSink for MemoryReportSink {
	fn record(&self, event: ReportEvent) -> Result<(), ElectionError> {
		self.events.lock().push(event);

		Ok(())
	}

	fn record_summary(&self, summary: NodeSummary) -> Result<(), ElectionError> {
		self.summaries.lock().push(summary);

		Ok(())
	}
}
