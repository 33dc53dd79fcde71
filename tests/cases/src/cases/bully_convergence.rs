//! Five-node Bully cluster: node 0 initiates, every challenged node
//! replies ALIVE and cascades, and the highest id wins everywhere.

use std::time::Duration;

use election::Algorithm;
use election_modules::{MemoryReportSink, ReportAnalysis};

use crate::steps::cluster::TestCluster;

pub fn run() {
	let cluster = TestCluster::start(Algorithm::Bully, 5, 0);

	cluster.await_convergence(4, Duration::from_secs(10));
	cluster.assert_single_coordinator();

	// The captured report stream must agree with the node states.
	let report_sink = cluster.report_sink.clone();
	let analysis = ReportAnalysis::from_events(&report_sink.events());
	assert_eq!(analysis.coordinator, Some(4));
	assert!(analysis.message_count > 0);

	cluster.terminate();

	// Every node flushed exactly one final summary on shutdown.
	assert_eq!(summary_node_ids(&report_sink), vec![0, 1, 2, 3, 4]);

	let coordinator_summaries = report_sink
		.summaries()
		.iter()
		.filter(|summary| summary.is_coordinator)
		.count();
	assert_eq!(coordinator_summaries, 1);
}

fn summary_node_ids(report_sink: &MemoryReportSink) -> Vec<u64> {
	let mut node_ids: Vec<u64> = report_sink
		.summaries()
		.iter()
		.map(|summary| summary.node_id)
		.collect();
	node_ids.sort();

	node_ids
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_bully_convergence() {
		crate::cases::bully_convergence::run()
	}
}
