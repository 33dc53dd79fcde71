use core::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::communication::Transport;
use crate::leadership::ElectionTimer;
use crate::report::ReportSink;
use crate::NodeId;

/// Election algorithm variant. The two variants are mutually
/// exclusive for the process lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
	Bully,
	Ring,
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Algorithm::Bully => write!(f, "bully"),
			Algorithm::Ring => write!(f, "ring"),
		}
	}
}

impl FromStr for Algorithm {
	type Err = String;

	fn from_str(value: &str) -> Result<Algorithm, String> {
		match value.to_ascii_lowercase().as_str() {
			"bully" => Ok(Algorithm::Bully),
			"ring" => Ok(Algorithm::Ring),
			other => Err(format!("Unknown algorithm: {}", other)),
		}
	}
}

/// Fixed-size cluster with dense node ids in `[0, size)`.
pub trait Cluster: Clone + Send + Sync + 'static {
	fn size(&self) -> u64;

	fn all_nodes(&self) -> Vec<NodeId> {
		(0..self.size()).collect()
	}

	fn peers(&self, node_id: NodeId) -> Vec<NodeId> {
		let mut peer_ids = self.all_nodes();
		peer_ids.retain(|&id| id != node_id);

		peer_ids
	}

	/// Nodes with strictly higher ids. The Bully challenge set.
	fn higher_nodes(&self, node_id: NodeId) -> Vec<NodeId> {
		(node_id + 1..self.size()).collect()
	}

	/// Fixed ring successor.
	fn successor(&self, node_id: NodeId) -> NodeId {
		(node_id + 1) % self.size()
	}
}

/// Protocol timing parameters. The response-wait and circuit
/// timeouts come from the injected `ElectionTimer` instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeTimings {
	/// Coordinator HEARTBEAT broadcast period.
	pub heartbeat_interval: Duration,
	/// Watchdog poll period; also bounds shutdown latency.
	pub poll_interval: Duration,
	/// Delay before the bootstrap node starts the first election,
	/// giving peers time to bind their listeners.
	pub settle_delay: Duration,
}

impl Default for NodeTimings {
	fn default() -> NodeTimings {
		NodeTimings {
			heartbeat_interval: Duration::from_secs(3),
			poll_interval: Duration::from_secs(1),
			settle_delay: Duration::from_secs(2),
		}
	}
}

pub struct NodeConfiguration<Tr, Et, Rs, Cl>
where
	Tr: Transport,
	Et: ElectionTimer,
	Rs: ReportSink,
	Cl: Cluster,
{
	pub node_id: NodeId,
	pub algorithm: Algorithm,
	/// Exactly one node per cluster should bootstrap the first
	/// election; by convention node 0.
	pub initiator: bool,
	pub cluster: Cl,
	pub transport: Tr,
	pub election_timer: Et,
	pub report_sink: Rs,
	pub timings: NodeTimings,
}
