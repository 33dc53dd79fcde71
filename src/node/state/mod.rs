use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;

use crate::communication::Transport;
use crate::messages::ElectionMessage;
use crate::node::configuration::{Algorithm, Cluster, NodeTimings};
use crate::node::status::{NodeStatus, StatusHandle};
use crate::report::{NodeSummary, ReportEvent, ReportSink};
use crate::NodeId;

#[cfg(test)]
mod tests;

/// Per-node election state plus its collaborators. Owned by the
/// election loop: all mutation happens on that single thread, other
/// workers only read through the shared lock.
#[derive(Debug)]
pub struct Node<Tr, Rs, Cl>
where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub id: NodeId,
	algorithm: Algorithm,
	coordinator_id: Option<NodeId>,
	coordinator_announced_at: Option<DateTime<Utc>>,
	election_in_progress: bool,
	token_in_flight: bool,
	last_heartbeat_at: Instant,

	transport: Tr,
	report_sink: Rs,
	cluster: Cl,
	timings: NodeTimings,
	status: StatusHandle,
	initial_heartbeat_tx: Sender<()>,
}

impl<Tr, Rs, Cl> Node<Tr, Rs, Cl>
where
	Tr: Transport,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub fn new(
		id: NodeId,
		algorithm: Algorithm,
		transport: Tr,
		report_sink: Rs,
		cluster: Cl,
		timings: NodeTimings,
		status: StatusHandle,
		initial_heartbeat_tx: Sender<()>,
	) -> Node<Tr, Rs, Cl> {
		Node {
			id,
			algorithm,
			coordinator_id: None,
			coordinator_announced_at: None,
			election_in_progress: false,
			token_in_flight: false,
			last_heartbeat_at: Instant::now(),
			transport,
			report_sink,
			cluster,
			timings,
			status,
			initial_heartbeat_tx,
		}
	}

	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	pub fn timings(&self) -> NodeTimings {
		self.timings
	}

	pub fn coordinator_id(&self) -> Option<NodeId> {
		self.coordinator_id
	}

	pub fn is_coordinator(&self) -> bool {
		self.coordinator_id == Some(self.id)
	}

	pub fn election_in_progress(&self) -> bool {
		self.election_in_progress
	}

	pub fn token_in_flight(&self) -> bool {
		self.token_in_flight
	}

	pub fn heartbeat_elapsed(&self) -> Duration {
		self.last_heartbeat_at.elapsed()
	}

	pub fn peers(&self) -> Vec<NodeId> {
		self.cluster.peers(self.id)
	}

	pub fn higher_nodes(&self) -> Vec<NodeId> {
		self.cluster.higher_nodes(self.id)
	}

	pub fn successor(&self) -> NodeId {
		self.cluster.successor(self.id)
	}

	/// Best-effort send, mirrored exactly once to the report sink.
	/// Failed sends are logged and absorbed; the timeout-driven
	/// protocol tolerates lost messages.
	pub fn send_message(&self, destination_node_id: NodeId, message: ElectionMessage) {
		let event = ReportEvent::sent(self.id, destination_node_id, &message);
		if let Err(err) = self.report_sink.record(event) {
			error!("Node {} cannot record send event: {}", self.id, err);
		}

		trace!(
			"Node {} sending {} to Node {}",
			self.id,
			message,
			destination_node_id
		);

		if let Err(err) = self.transport.send(destination_node_id, message) {
			warn!(
				"Node {} failed to send to Node {}: {}",
				self.id, destination_node_id, err
			);
		}
	}

	/// Marks the start of an election episode. Returns false when one
	/// is already running, preventing re-entrant elections.
	pub fn begin_election(&mut self) -> bool {
		if self.election_in_progress {
			trace!("Node {} election already in progress", self.id);
			return false;
		}
		self.election_in_progress = true;

		true
	}

	/// Abandons own candidacy after a higher node responded.
	pub fn abandon_election(&mut self) {
		self.election_in_progress = false;
	}

	pub fn mark_token_sent(&mut self) {
		self.token_in_flight = true;
	}

	/// Lost-token recovery entry point.
	pub fn clear_token_in_flight(&mut self) {
		self.token_in_flight = false;
		self.election_in_progress = false;
	}

	/// Broadcasts `COORDINATOR{leader}` to every peer and applies the
	/// announcement locally.
	pub fn announce_coordinator(&mut self, leader: NodeId) {
		let message = ElectionMessage::coordinator(self.id, leader);
		let announced_at = message.timestamp;

		info!("Node {} announcing Node {} as coordinator", self.id, leader);

		for peer_id in self.peers() {
			self.send_message(peer_id, message.clone());
		}

		self.apply_coordinator(leader, announced_at);
	}

	/// Applies a COORDINATOR announcement. Announcements staler than
	/// the current one never regress the known coordinator; duplicates
	/// are a state no-op. Returns true when the announcement applied.
	pub fn apply_coordinator(&mut self, leader: NodeId, announced_at: DateTime<Utc>) -> bool {
		if let Some(previous) = self.coordinator_announced_at {
			if announced_at <= previous {
				debug!(
					"Node {} ignoring stale coordinator announcement for Node {}",
					self.id, leader
				);
				return false;
			}
		}

		let was_coordinator = self.is_coordinator();

		self.coordinator_id = Some(leader);
		self.coordinator_announced_at = Some(announced_at);
		self.election_in_progress = false;
		self.token_in_flight = false;
		self.last_heartbeat_at = Instant::now();

		info!("Node {}: Node {} is the new coordinator", self.id, leader);

		if self.is_coordinator() && !was_coordinator {
			if self.initial_heartbeat_tx.send(()).is_err() {
				warn!("Node {} heartbeat sender is gone", self.id);
			}
		}

		true
	}

	/// Records a HEARTBEAT observation; only the current coordinator
	/// refreshes the liveness clock.
	pub fn observe_heartbeat(&mut self, sender: NodeId) {
		if Some(sender) == self.coordinator_id {
			self.last_heartbeat_at = Instant::now();
			trace!(
				"Node {} received heartbeat from coordinator Node {}",
				self.id,
				sender
			);
		} else {
			debug!(
				"Node {} ignoring heartbeat from non-coordinator Node {}",
				self.id, sender
			);
		}
	}

	pub fn publish_status(&self) {
		self.status.update(NodeStatus {
			node_id: self.id,
			coordinator_id: self.coordinator_id,
			is_coordinator: self.is_coordinator(),
			election_in_progress: self.election_in_progress,
		});
	}

	/// Final state flush at shutdown.
	pub fn flush_summary(&self) {
		let summary = NodeSummary {
			node_id: self.id,
			algorithm: self.algorithm,
			coordinator_id: self.coordinator_id,
			is_coordinator: self.is_coordinator(),
		};

		if let Err(err) = self.report_sink.record_summary(summary) {
			error!("Node {} cannot record final summary: {}", self.id, err);
		}
	}
}
