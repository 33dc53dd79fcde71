//! Failure detection: the elected coordinator is killed, followers
//! miss two heartbeat windows and elect the next-highest id.

use std::time::Duration;

use election::Algorithm;

use crate::steps::cluster::{test_timings, TestCluster, ELECTION_TIMEOUT_MS};

pub fn run() {
	let mut cluster = TestCluster::start(Algorithm::Bully, 5, 0);

	cluster.await_convergence(4, Duration::from_secs(10));

	cluster.kill_node(4);

	// Worst case: 2 x heartbeat_interval + poll_interval to suspect
	// the coordinator, then one response wait to win the election.
	// Triple it for scheduling jitter; a detection regression still
	// blows well past this.
	let timings = test_timings();
	let detection_bound = 2 * timings.heartbeat_interval + timings.poll_interval;
	let election_bound = Duration::from_millis(ELECTION_TIMEOUT_MS);

	cluster.await_convergence(3, 3 * (detection_bound + election_bound));
	cluster.assert_single_coordinator();

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_coordinator_failover() {
		crate::cases::coordinator_failover::run()
	}
}
