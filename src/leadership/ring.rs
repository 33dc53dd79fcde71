//! Ring variant: a token accumulates participant ids along the fixed
//! ring `(i + 1) mod N`; one full circuit elects `max(participants)`.

use crate::communication::Transport;
use crate::leadership::{ElectionTimer, ProtocolTimer};
use crate::messages::ElectionMessage;
use crate::node::configuration::Cluster;
use crate::node::state::Node;
use crate::report::ReportSink;

/// Injects a fresh token carrying only this node's id, unless one is
/// already in flight. The circuit timer recovers lost tokens.
pub fn start_election<Tr, Rs, Cl, Et>(
	node: &mut Node<Tr, Rs, Cl>,
	circuit_timer: &mut ProtocolTimer,
	election_timer: &Et,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
	Et: ElectionTimer,
{
	if node.token_in_flight() {
		trace!("Node {} token already in flight", node.id);
		return;
	}

	info!("Node {} starting Ring election", node.id);

	node.begin_election();
	node.mark_token_sent();

	let successor = node.successor();
	node.send_message(successor, ElectionMessage::token(node.id, vec![node.id]));

	circuit_timer.arm(election_timer.next_timeout());
}

/// Processes a circulating token. A completed circuit is detected by
/// list membership, or by the token returning to its originator
/// unmodified (`sender == self`) so an empty self-loop cannot be
/// counted twice.
pub fn handle_token<Tr, Rs, Cl>(
	node: &mut Node<Tr, Rs, Cl>,
	message: &ElectionMessage,
	circuit_timer: &mut ProtocolTimer,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	let mut participants = message.data.participants.clone().unwrap_or_default();

	let circuit_complete = participants.contains(&node.id) || message.sender == node.id;

	if circuit_complete {
		let new_leader = participants.iter().max().cloned().unwrap_or(node.id);

		info!(
			"Node {}: token completed its circuit with participants {:?}, Node {} wins",
			node.id, participants, new_leader
		);

		circuit_timer.disarm();
		node.clear_token_in_flight();
		node.announce_coordinator(new_leader);
		return;
	}

	participants.push(node.id);

	let successor = node.successor();
	trace!(
		"Node {} forwarding token {:?} to Node {}",
		node.id,
		participants,
		successor
	);

	node.send_message(successor, ElectionMessage::token(node.id, participants));
}

/// Circuit timer expiry: the token was lost. Reset the guard and
/// re-issue, driving the protocol forward.
pub fn handle_circuit_timeout<Tr, Rs, Cl, Et>(
	node: &mut Node<Tr, Rs, Cl>,
	circuit_timer: &mut ProtocolTimer,
	election_timer: &Et,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
	Et: ElectionTimer,
{
	circuit_timer.disarm();

	if !node.token_in_flight() {
		return;
	}

	warn!("Node {}: token lost, re-issuing", node.id);

	node.clear_token_in_flight();
	start_election(node, circuit_timer, election_timer);
}
