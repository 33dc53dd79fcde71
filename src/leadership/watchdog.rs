use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

use crate::communication::Transport;
use crate::leadership::NodeEvent;
use crate::node::configuration::Cluster;
use crate::node::state::Node;
use crate::report::ReportSink;

pub struct WatchdogParams<Tr, Rs, Cl>
where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub protected_node: Arc<Mutex<Node<Tr, Rs, Cl>>>,
	pub event_tx: Sender<NodeEvent>,
}

/// Heartbeat failure detector and the sole failure-detection
/// mechanism: when the known coordinator misses two heartbeat
/// windows, a new election is injected into the event loop.
pub fn watch_coordinator_status<Tr, Rs, Cl>(
	params: WatchdogParams<Tr, Rs, Cl>,
	terminate_worker_rx: Receiver<()>,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	info!("Coordinator watchdog worker started");

	let timings = {
		let node = params
			.protected_node
			.lock()
			.expect("node lock is not poisoned");
		node.timings()
	};
	let detection_threshold = 2 * timings.heartbeat_interval;

	loop {
		let poll_timeout = crossbeam_channel::after(timings.poll_interval);
		select!(
			recv(terminate_worker_rx) -> res => {
				if res.is_err() {
					error!("Abnormal exit for coordinator watchdog worker");
				}
				break
			},
			recv(poll_timeout) -> _ => {
				let suspected = {
					let node = params
						.protected_node
						.lock()
						.expect("node lock is not poisoned");

					match node.coordinator_id() {
						Some(coordinator_id)
							if !node.is_coordinator()
								&& !node.election_in_progress()
								&& node.heartbeat_elapsed() > detection_threshold =>
						{
							info!(
								"Node {}: coordinator Node {} missed {:?} of heartbeats, \
								 starting election",
								node.id, coordinator_id, detection_threshold
							);
							true
						}
						_ => false,
					}
				};

				if suspected && params.event_tx.send(NodeEvent::StartElection).is_err() {
					warn!("Election loop is gone, stopping watchdog");
					break
				}
			},
		);
	}

	info!("Coordinator watchdog worker stopped");
}
