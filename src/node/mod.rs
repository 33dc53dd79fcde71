use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

use crate::common;
use crate::common::WorkerPool;
use crate::communication::listener::{listen_inbound, ListenerParams};
use crate::communication::Transport;
use crate::leadership::election_loop::{run_election_loop, ElectionLoopParams};
use crate::leadership::heartbeat_sender::{send_heartbeats, HeartbeatSenderParams};
use crate::leadership::watchdog::{watch_coordinator_status, WatchdogParams};
use crate::leadership::{ElectionTimer, NodeEvent};
use crate::node::configuration::{Cluster, NodeConfiguration};
use crate::node::state::Node;
use crate::node::status::StatusHandle;
use crate::report::ReportSink;

pub mod configuration;
pub mod state;
pub mod status;

pub struct NodeStartingParams<Tr, Et, Rs, Cl>
where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub node_config: NodeConfiguration<Tr, Et, Rs, Cl>,
	pub status: StatusHandle,
}

/// Composes transport listener, election loop, heartbeat sender and
/// watchdog into one addressable node process.
pub fn start<Tr, Et, Rs, Cl>(
	params: NodeStartingParams<Tr, Et, Rs, Cl>,
	terminate_worker_rx: Receiver<()>,
) where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	let config = params.node_config;
	let node_id = config.node_id;

	let (event_tx, event_rx): (Sender<NodeEvent>, Receiver<NodeEvent>) =
		crossbeam_channel::unbounded();
	let (initial_heartbeat_tx, initial_heartbeat_rx): (Sender<()>, Receiver<()>) =
		crossbeam_channel::unbounded();

	let node = Node::new(
		node_id,
		config.algorithm,
		config.transport.clone(),
		config.report_sink.clone(),
		config.cluster.clone(),
		config.timings,
		params.status,
		initial_heartbeat_tx,
	);
	node.publish_status();

	let protected_node = Arc::new(Mutex::new(node));

	let listener_worker = common::run_worker(
		listen_inbound,
		ListenerParams {
			node_id,
			transport: config.transport,
			report_sink: config.report_sink,
			event_tx: event_tx.clone(),
		},
	);

	let election_worker = common::run_worker(
		run_election_loop,
		ElectionLoopParams {
			protected_node: protected_node.clone(),
			event_rx,
			election_timer: config.election_timer,
			initiator: config.initiator,
			settle_delay: config.timings.settle_delay,
		},
	);

	let heartbeat_worker = common::run_worker(
		send_heartbeats,
		HeartbeatSenderParams {
			protected_node: protected_node.clone(),
			heartbeat_interval: config.timings.heartbeat_interval,
			initial_heartbeat_rx,
		},
	);

	let watchdog_worker = common::run_worker(
		watch_coordinator_status,
		WatchdogParams {
			protected_node,
			event_tx,
		},
	);

	info!("Node {} started", node_id);

	let worker_pool = WorkerPool::new(vec![
		listener_worker,
		election_worker,
		heartbeat_worker,
		watchdog_worker,
	]);

	if terminate_worker_rx.recv().is_err() {
		error!("Abnormal exit for node worker");
	}

	worker_pool.terminate();
	worker_pool.join();

	info!("Node {} stopped", node_id);
}
