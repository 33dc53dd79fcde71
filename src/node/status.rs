use std::sync::{Arc, Mutex};

use crate::NodeId;

/// Observable node state snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeStatus {
	pub node_id: NodeId,
	pub coordinator_id: Option<NodeId>,
	pub is_coordinator: bool,
	pub election_in_progress: bool,
}

/// Shared view of a node's state, written only by the node's event
/// loop and read by callers holding the `NodeWorker`.
#[derive(Clone, Debug)]
pub struct StatusHandle {
	inner: Arc<Mutex<NodeStatus>>,
}

impl StatusHandle {
	pub fn new(node_id: NodeId) -> StatusHandle {
		StatusHandle {
			inner: Arc::new(Mutex::new(NodeStatus {
				node_id,
				coordinator_id: None,
				is_coordinator: false,
				election_in_progress: false,
			})),
		}
	}

	pub fn snapshot(&self) -> NodeStatus {
		*self.inner.lock().expect("status lock is not poisoned")
	}

	pub(crate) fn update(&self, status: NodeStatus) {
		*self.inner.lock().expect("status lock is not poisoned") = status;
	}
}
