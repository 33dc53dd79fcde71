//! Bully variant: a node challenges every strictly-higher id and
//! self-declares when none answers. The highest surviving id always
//! wins because any challenger that receives an ALIVE defers to a
//! higher node, transitively up to the maximum.

use crate::communication::Transport;
use crate::leadership::{ElectionTimer, ProtocolTimer};
use crate::messages::ElectionMessage;
use crate::node::configuration::Cluster;
use crate::node::state::Node;
use crate::report::ReportSink;

/// Starts a Bully election unless one is already pending. With no
/// higher-id nodes in the cluster the node becomes coordinator
/// immediately; otherwise the response timer is armed.
pub fn start_election<Tr, Rs, Cl, Et>(
	node: &mut Node<Tr, Rs, Cl>,
	response_timer: &mut ProtocolTimer,
	election_timer: &Et,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
	Et: ElectionTimer,
{
	if !node.begin_election() {
		return;
	}

	info!("Node {} starting Bully election", node.id);

	let higher_nodes = node.higher_nodes();
	if higher_nodes.is_empty() {
		response_timer.disarm();
		node.announce_coordinator(node.id);
		return;
	}

	for node_id in higher_nodes {
		node.send_message(node_id, ElectionMessage::election(node.id));
	}

	response_timer.arm(election_timer.next_timeout());
}

/// ELECTION from a lower id: answer ALIVE right away, then cascade an
/// own election so the challenge bubbles up to the highest live id.
pub fn handle_election<Tr, Rs, Cl, Et>(
	node: &mut Node<Tr, Rs, Cl>,
	message: &ElectionMessage,
	response_timer: &mut ProtocolTimer,
	election_timer: &Et,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
	Et: ElectionTimer,
{
	if message.sender >= node.id {
		trace!(
			"Node {} ignoring election challenge from Node {}",
			node.id,
			message.sender
		);
		return;
	}

	node.send_message(message.sender, ElectionMessage::alive(node.id));

	if !node.election_in_progress() {
		start_election(node, response_timer, election_timer);
	}
}

/// ALIVE while pending: a higher node is up, abandon own candidacy
/// and await the winner's COORDINATOR announcement.
pub fn handle_alive<Tr, Rs, Cl>(
	node: &mut Node<Tr, Rs, Cl>,
	message: &ElectionMessage,
	response_timer: &mut ProtocolTimer,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	if !node.election_in_progress() {
		debug!(
			"Node {} received late ALIVE from Node {}",
			node.id, message.sender
		);
		return;
	}

	info!(
		"Node {} received ALIVE from Node {}, abandoning candidacy",
		node.id, message.sender
	);

	node.abandon_election();
	response_timer.disarm();
}

/// Response timer expiry with no ALIVE received: no higher node is
/// alive, declare self coordinator.
pub fn handle_response_timeout<Tr, Rs, Cl>(
	node: &mut Node<Tr, Rs, Cl>,
	response_timer: &mut ProtocolTimer,
) where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	response_timer.disarm();

	if !node.election_in_progress() {
		return;
	}

	info!(
		"Node {}: no response from higher nodes, declaring self coordinator",
		node.id
	);

	node.announce_coordinator(node.id);
}
