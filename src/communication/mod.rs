use crossbeam_channel::Receiver;

use crate::errors::Result;
use crate::messages::ElectionMessage;
use crate::NodeId;

pub mod listener;

/// Best-effort message channel between nodes. Delivery is not
/// guaranteed and no ordering is assumed across distinct peers.
pub trait Transport: Clone + Send + 'static {
	/// Sends a message to the destination node. Implementations may
	/// retry transient failures internally; an `Err` means the send
	/// was abandoned and the caller must not assume delivery.
	fn send(&self, destination_node_id: NodeId, message: ElectionMessage) -> Result<()>;

	/// Inbound message channel for the given node. `node_id` must be
	/// an endpoint of this transport; implementations panic otherwise,
	/// since a node cannot run without its inbound channel.
	fn message_rx(&self, node_id: NodeId) -> Receiver<ElectionMessage>;
}
