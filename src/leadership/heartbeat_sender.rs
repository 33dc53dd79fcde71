use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::communication::Transport;
use crate::messages::ElectionMessage;
use crate::node::configuration::Cluster;
use crate::node::state::Node;
use crate::report::ReportSink;

pub struct HeartbeatSenderParams<Tr, Rs, Cl>
where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub protected_node: Arc<Mutex<Node<Tr, Rs, Cl>>>,
	pub heartbeat_interval: Duration,
	pub initial_heartbeat_rx: Receiver<()>,
}

/// Broadcasts HEARTBEAT to every peer at a fixed period, but only
/// while this node is the coordinator. Winning an election triggers
/// one immediate heartbeat through the initial-heartbeat channel.
pub fn send_heartbeats<Tr, Rs, Cl>(
	params: HeartbeatSenderParams<Tr, Rs, Cl>,
	terminate_worker_rx: Receiver<()>,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	info!("Heartbeat sender worker started");

	loop {
		let heartbeat_timeout = crossbeam_channel::after(params.heartbeat_interval);
		select!(
			recv(terminate_worker_rx) -> res => {
				if res.is_err() {
					error!("Abnormal exit for heartbeat sender worker");
				}
				break
			},
			recv(heartbeat_timeout) -> _ => {
				send_heartbeat(&params.protected_node);
			},
			recv(params.initial_heartbeat_rx) -> res => {
				if res.is_err() {
					break
				}
				trace!("Sending initial heartbeat");
				send_heartbeat(&params.protected_node);
			},
		);
	}

	info!("Heartbeat sender worker stopped");
}

fn send_heartbeat<Tr, Rs, Cl>(protected_node: &Arc<Mutex<Node<Tr, Rs, Cl>>>)
where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	let node = protected_node.lock().expect("node lock is not poisoned");

	if !node.is_coordinator() {
		return;
	}

	trace!("Node {} broadcasting heartbeat", node.id);

	let message = ElectionMessage::heartbeat(node.id);
	for peer_id in node.peers() {
		node.send_message(peer_id, message.clone());
	}
}
