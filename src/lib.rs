#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use] extern crate log;
#[macro_use] extern crate crossbeam_channel;


mod common;
mod communication;
mod errors;
mod leadership;
mod messages;
mod node;
mod report;

#[cfg(test)]
pub(crate) mod test_support;


pub use communication::Transport;
pub use errors::{new_err, ElectionError};
pub use leadership::ElectionTimer;
pub use messages::{ElectionMessage, MessageData, MessageKind};
pub use node::configuration::{Algorithm, Cluster, NodeConfiguration, NodeTimings};
pub use node::status::{NodeStatus, StatusHandle};
pub use report::{Direction, NodeSummary, ReportEvent, ReportSink};

pub type NodeId = u64;

/// Handle to a running node: worker lifecycle plus a live status view.
#[derive(Debug)]
pub struct NodeWorker {
	worker: common::Worker,
	status: StatusHandle,
}

impl NodeWorker {
	/// Current state snapshot of the node, updated by its event loop.
	pub fn status(&self) -> NodeStatus {
		self.status.snapshot()
	}

	/// Signals the node to stop and waits for all its workers to exit.
	pub fn terminate(self) {
		if self.worker.terminate_worker_tx.send(()).is_err() {
			warn!("Node worker is already stopped");
		}
		if self.worker.join_handle.join().is_err() {
			error!("Node worker panicked");
		}
	}
}

pub fn start_node<Tr, Et, Rs, Cl>(node_config: NodeConfiguration<Tr, Et, Rs, Cl>) -> NodeWorker
where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	let status = StatusHandle::new(node_config.node_id);

	let worker = common::run_worker(
		node::start,
		node::NodeStartingParams {
			node_config,
			status: status.clone(),
		},
	);

	NodeWorker { worker, status }
}
