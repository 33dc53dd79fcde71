//! Shared test doubles for unit tests.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

use crate::communication::Transport;
use crate::errors::Result;
use crate::messages::ElectionMessage;
use crate::node::configuration::{Algorithm, Cluster, NodeTimings};
use crate::node::state::Node;
use crate::node::status::StatusHandle;
use crate::report::{NodeSummary, ReportEvent, ReportSink};
use crate::NodeId;

#[derive(Clone, Copy, Debug)]
pub struct FixedCluster(pub u64);

impl Cluster for FixedCluster {
	fn size(&self) -> u64 {
		self.0
	}
}

/// Transport double capturing every outbound message.
#[derive(Clone, Debug)]
pub struct RecordingTransport {
	pub sent: Arc<Mutex<Vec<(NodeId, ElectionMessage)>>>,
	inbound_tx: Sender<ElectionMessage>,
	inbound_rx: Receiver<ElectionMessage>,
}

impl RecordingTransport {
	pub fn new() -> RecordingTransport {
		let (inbound_tx, inbound_rx) = crossbeam_channel::unbounded();

		RecordingTransport {
			sent: Arc::new(Mutex::new(Vec::new())),
			inbound_tx,
			inbound_rx,
		}
	}

	pub fn sent_messages(&self) -> Vec<(NodeId, ElectionMessage)> {
		self.sent.lock().expect("sent lock is not poisoned").clone()
	}

	pub fn sent_to(&self, destination: NodeId) -> Vec<ElectionMessage> {
		self.sent_messages()
			.into_iter()
			.filter(|(to, _)| *to == destination)
			.map(|(_, message)| message)
			.collect()
	}

	pub fn inject(&self, message: ElectionMessage) {
		self.inbound_tx
			.send(message)
			.expect("inbound channel is open");
	}
}

impl Transport for RecordingTransport {
	fn send(&self, destination_node_id: NodeId, message: ElectionMessage) -> Result<()> {
		self.sent
			.lock()
			.expect("sent lock is not poisoned")
			.push((destination_node_id, message));

		Ok(())
	}

	fn message_rx(&self, _node_id: NodeId) -> Receiver<ElectionMessage> {
		self.inbound_rx.clone()
	}
}

/// Report sink double keeping events in memory.
#[derive(Clone, Debug)]
pub struct RecordingSink {
	pub events: Arc<Mutex<Vec<ReportEvent>>>,
	pub summaries: Arc<Mutex<Vec<NodeSummary>>>,
}

impl RecordingSink {
	pub fn new() -> RecordingSink {
		RecordingSink {
			events: Arc::new(Mutex::new(Vec::new())),
			summaries: Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn recorded_events(&self) -> Vec<ReportEvent> {
		self.events
			.lock()
			.expect("events lock is not poisoned")
			.clone()
	}
}

impl ReportSink for RecordingSink {
	fn record(&self, event: ReportEvent) -> Result<()> {
		self.events
			.lock()
			.expect("events lock is not poisoned")
			.push(event);

		Ok(())
	}

	fn record_summary(&self, summary: NodeSummary) -> Result<()> {
		self.summaries
			.lock()
			.expect("summaries lock is not poisoned")
			.push(summary);

		Ok(())
	}
}

pub struct NodeFixture {
	pub node: Node<RecordingTransport, RecordingSink, FixedCluster>,
	pub transport: RecordingTransport,
	pub sink: RecordingSink,
	pub initial_heartbeat_rx: Receiver<()>,
}

pub fn test_node(node_id: NodeId, cluster_size: u64, algorithm: Algorithm) -> NodeFixture {
	let transport = RecordingTransport::new();
	let sink = RecordingSink::new();
	let (initial_heartbeat_tx, initial_heartbeat_rx) = crossbeam_channel::unbounded();

	let node = Node::new(
		node_id,
		algorithm,
		transport.clone(),
		sink.clone(),
		FixedCluster(cluster_size),
		NodeTimings::default(),
		StatusHandle::new(node_id),
		initial_heartbeat_tx,
	);

	NodeFixture {
		node,
		transport,
		sink,
		initial_heartbeat_rx,
	}
}
