use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::communication::Transport;
use crate::leadership::{bully, ring, ElectionTimer, NodeEvent, ProtocolTimer};
use crate::messages::{ElectionMessage, MessageKind};
use crate::node::configuration::{Algorithm, Cluster};
use crate::node::state::Node;
use crate::report::ReportSink;

pub struct ElectionLoopParams<Tr, Et, Rs, Cl>
where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub protected_node: Arc<Mutex<Node<Tr, Rs, Cl>>>,
	pub event_rx: Receiver<NodeEvent>,
	pub election_timer: Et,
	pub initiator: bool,
	pub settle_delay: Duration,
}

/// Single-writer event loop. All inbound messages, election triggers
/// and timer expiries are serialized here; no other worker mutates
/// node state.
pub fn run_election_loop<Tr, Et, Rs, Cl>(
	params: ElectionLoopParams<Tr, Et, Rs, Cl>,
	terminate_worker_rx: Receiver<()>,
) where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	let (node_id, algorithm) = {
		let node = params
			.protected_node
			.lock()
			.expect("node lock is not poisoned");
		(node.id, node.algorithm())
	};

	info!(
		"Node {} election loop started ({} algorithm)",
		node_id, algorithm
	);

	let mut response_timer = ProtocolTimer::new();
	let mut circuit_timer = ProtocolTimer::new();

	let bootstrap_rx = if params.initiator {
		crossbeam_channel::after(params.settle_delay)
	} else {
		crossbeam_channel::never()
	};

	loop {
		// Snapshots of the deadline channels, so the arms below can
		// re-arm the timers without aliasing them.
		let response_deadline_rx = response_timer.deadline_rx().clone();
		let circuit_deadline_rx = circuit_timer.deadline_rx().clone();

		select!(
			recv(terminate_worker_rx) -> res => {
				if res.is_err() {
					error!("Abnormal exit for election loop");
				}
				let node = params.protected_node.lock().expect("node lock is not poisoned");
				node.flush_summary();
				break
			},
			recv(bootstrap_rx) -> _ => {
				info!("Node {} initiating the first election", node_id);
				let mut node = params.protected_node.lock().expect("node lock is not poisoned");
				start_election(
					&mut node,
					algorithm,
					&mut response_timer,
					&mut circuit_timer,
					&params.election_timer,
				);
				node.publish_status();
			},
			recv(params.event_rx) -> res => {
				let event = match res {
					Ok(event) => event,
					Err(_) => {
						warn!("Node {} event channel closed", node_id);
						break
					}
				};

				let mut node = params.protected_node.lock().expect("node lock is not poisoned");
				match event {
					NodeEvent::Inbound(message) => dispatch_message(
						&mut node,
						algorithm,
						&message,
						&mut response_timer,
						&mut circuit_timer,
						&params.election_timer,
					),
					NodeEvent::StartElection => start_election(
						&mut node,
						algorithm,
						&mut response_timer,
						&mut circuit_timer,
						&params.election_timer,
					),
				}
				node.publish_status();
			},
			recv(response_deadline_rx) -> _ => {
				let mut node = params.protected_node.lock().expect("node lock is not poisoned");
				bully::handle_response_timeout(&mut node, &mut response_timer);
				node.publish_status();
			},
			recv(circuit_deadline_rx) -> _ => {
				let mut node = params.protected_node.lock().expect("node lock is not poisoned");
				ring::handle_circuit_timeout(&mut node, &mut circuit_timer, &params.election_timer);
				node.publish_status();
			},
		);
	}

	info!("Node {} election loop stopped", node_id);
}

fn start_election<Tr, Et, Rs, Cl>(
	node: &mut Node<Tr, Rs, Cl>,
	algorithm: Algorithm,
	response_timer: &mut ProtocolTimer,
	circuit_timer: &mut ProtocolTimer,
	election_timer: &Et,
) where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	match algorithm {
		Algorithm::Bully => bully::start_election(node, response_timer, election_timer),
		Algorithm::Ring => ring::start_election(node, circuit_timer, election_timer),
	}
}

fn dispatch_message<Tr, Et, Rs, Cl>(
	node: &mut Node<Tr, Rs, Cl>,
	algorithm: Algorithm,
	message: &ElectionMessage,
	response_timer: &mut ProtocolTimer,
	circuit_timer: &mut ProtocolTimer,
	election_timer: &Et,
) where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	match (message.kind, algorithm) {
		(MessageKind::Heartbeat, _) => node.observe_heartbeat(message.sender),
		(MessageKind::Coordinator, _) => {
			let applied = node.apply_coordinator(message.announced_leader(), message.timestamp);
			if applied {
				response_timer.disarm();
				circuit_timer.disarm();
			}
		}
		(MessageKind::Election, Algorithm::Bully) => {
			bully::handle_election(node, message, response_timer, election_timer)
		}
		(MessageKind::Alive, Algorithm::Bully) => {
			bully::handle_alive(node, message, response_timer)
		}
		(MessageKind::Token, Algorithm::Ring) => {
			ring::handle_token(node, message, circuit_timer)
		}
		(kind, _) => {
			warn!(
				"Node {} dropping {} message, not valid for the {} algorithm",
				node.id, kind, algorithm
			);
		}
	}
}
