use std::collections::HashMap;
use std::time::{Duration, Instant};

use election::{Algorithm, NodeConfiguration, NodeTimings, NodeWorker};
use election_modules::{
	ClusterConfiguration, FixedElectionTimer, InProcTransport, MemoryReportSink,
};

/// Response-wait/circuit timeout for every node in a test cluster.
pub const ELECTION_TIMEOUT_MS: u64 = 150;

/// Compressed protocol timings so scenarios converge in well under a
/// second of wall-clock time.
pub fn test_timings() -> NodeTimings {
	NodeTimings {
		heartbeat_interval: Duration::from_millis(100),
		poll_interval: Duration::from_millis(25),
		settle_delay: Duration::from_millis(50),
	}
}

pub struct TestCluster {
	pub workers: HashMap<u64, NodeWorker>,
	pub transport: InProcTransport,
	pub report_sink: MemoryReportSink,
}

impl TestCluster {
	/// Starts `node_count` nodes sharing one in-proc transport and one
	/// report sink; `initiator` bootstraps the first election.
	pub fn start(algorithm: Algorithm, node_count: u64, initiator: u64) -> TestCluster {
		let all_nodes: Vec<u64> = (0..node_count).collect();
		let transport = InProcTransport::new(all_nodes.clone());
		let report_sink = MemoryReportSink::new();

		let mut workers = HashMap::new();
		for node_id in all_nodes {
			let node_config = NodeConfiguration {
				node_id,
				algorithm,
				initiator: node_id == initiator,
				cluster: ClusterConfiguration::new(node_count),
				transport: transport.clone(),
				election_timer: FixedElectionTimer::new(ELECTION_TIMEOUT_MS),
				report_sink: report_sink.clone(),
				timings: test_timings(),
			};

			workers.insert(node_id, election::start_node(node_config));
		}

		TestCluster {
			workers,
			transport,
			report_sink,
		}
	}

	/// Waits until every live node agrees on the expected coordinator
	/// with no election in progress. Panics on deadline expiry.
	pub fn await_convergence(&self, expected_coordinator: u64, deadline: Duration) {
		let started_at = Instant::now();

		loop {
			if self.converged_on(expected_coordinator) {
				return;
			}

			if started_at.elapsed() > deadline {
				let statuses: Vec<_> = self
					.workers
					.values()
					.map(|worker| worker.status())
					.collect();
				panic!(
					"No convergence on coordinator {} within {:?}: {:?}",
					expected_coordinator, deadline, statuses
				);
			}

			super::sleep_ms(20);
		}
	}

	fn converged_on(&self, expected_coordinator: u64) -> bool {
		self.workers.values().all(|worker| {
			let status = worker.status();
			status.coordinator_id == Some(expected_coordinator)
				&& !status.election_in_progress
				&& status.is_coordinator == (status.node_id == expected_coordinator)
		})
	}

	/// Safety property: at most one node considers itself coordinator.
	pub fn assert_single_coordinator(&self) {
		let coordinators: Vec<u64> = self
			.workers
			.values()
			.map(|worker| worker.status())
			.filter(|status| status.is_coordinator)
			.map(|status| status.node_id)
			.collect();

		assert!(
			coordinators.len() <= 1,
			"More than one coordinator: {:?}",
			coordinators
		);
	}

	/// Simulates a crash: stops the node's workers and severs its
	/// transport endpoint so peers see it as unreachable.
	pub fn kill_node(&mut self, node_id: u64) {
		info!("Killing Node {}", node_id);

		if let Some(worker) = self.workers.remove(&node_id) {
			worker.terminate();
		}
		self.transport.disconnect(node_id);
	}

	pub fn terminate(self) {
		for (_, worker) in self.workers {
			worker.terminate();
		}
	}
}
