use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use election::{new_err, ElectionError, ElectionMessage, NodeId, Transport};
use parking_lot::Mutex;

struct NodeChannels {
	tx: Option<Sender<ElectionMessage>>,
	rx: Receiver<ElectionMessage>,
}

/// In-memory transport for running whole clusters in one process.
/// Messages between a pair of nodes keep their order; nothing else is
/// guaranteed, mirroring the datagram transport.
#[derive(Clone)]
pub struct InProcTransport {
	channels: Arc<Mutex<HashMap<NodeId, NodeChannels>>>,
}

impl InProcTransport {
	pub fn new(all_nodes: Vec<NodeId>) -> InProcTransport {
		let mut channels = HashMap::new();

		for node_id in all_nodes {
			let (tx, rx) = crossbeam_channel::unbounded();
			channels.insert(node_id, NodeChannels { tx: Some(tx), rx });
		}

		InProcTransport {
			channels: Arc::new(Mutex::new(channels)),
		}
	}

	/// Severs a node's inbound channel, simulating a crashed peer:
	/// subsequent sends to it fail like an unreachable host.
	pub fn disconnect(&self, node_id: NodeId) {
		let mut channels = self.channels.lock();

		if let Some(node_channels) = channels.get_mut(&node_id) {
			node_channels.tx = None;
			info!("Node {} disconnected from in-proc transport", node_id);
		}
	}
}

impl Transport for InProcTransport {
	fn send(&self, destination_node_id: NodeId, message: ElectionMessage) -> Result<(), ElectionError> {
		let channels = self.channels.lock();

		let node_channels = match channels.get(&destination_node_id) {
			Some(node_channels) => node_channels,
			None => {
				return new_err(
					format!("Unknown destination Node {}", destination_node_id),
					String::new(),
				)
			}
		};

		match &node_channels.tx {
			Some(tx) => {
				if tx.send(message).is_err() {
					return new_err(
						format!("Cannot send to Node {}", destination_node_id),
						"channel closed".to_string(),
					);
				}
				Ok(())
			}
			None => new_err(
				format!("Node {} is unreachable", destination_node_id),
				String::new(),
			),
		}
	}

	fn message_rx(&self, node_id: NodeId) -> Receiver<ElectionMessage> {
		let channels = self.channels.lock();

		match channels.get(&node_id) {
			Some(node_channels) => node_channels.rx.clone(),
			None => panic!("Node {} is not registered with this transport", node_id),
		}
	}
}
