//! Four-node Ring cluster: node 2 injects the token, it travels
//! 3 → 0 → 1 → 2 accumulating ids, and max(participants) = 3 wins.

use std::time::Duration;

use election::{Algorithm, Direction, MessageKind};

use crate::steps::cluster::TestCluster;

pub fn run() {
	let cluster = TestCluster::start(Algorithm::Ring, 4, 2);

	cluster.await_convergence(3, Duration::from_secs(10));
	cluster.assert_single_coordinator();

	let events = cluster.report_sink.events();

	// The token visited each node exactly once before completing.
	let token_sends: Vec<_> = events
		.iter()
		.filter(|event| event.kind == MessageKind::Token && event.direction == Direction::Sent)
		.collect();
	assert_eq!(token_sends.len(), 4, "token circulates exactly one circuit");

	let senders: Vec<u64> = token_sends.iter().map(|event| event.from).collect();
	assert_eq!(senders, vec![2, 3, 0, 1]);

	let full_circuit = token_sends.last().unwrap();
	assert_eq!(
		full_circuit.data.participants,
		Some(vec![2, 3, 0, 1]),
		"participants accumulate in ring order"
	);

	cluster.terminate();
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_ring_circulation() {
		crate::cases::ring_circulation::run()
	}
}
