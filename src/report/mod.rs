use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::messages::{ElectionMessage, MessageData, MessageKind};
use crate::node::configuration::Algorithm;
use crate::NodeId;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Sent,
	Received,
}

/// One observed transport event, mirrored exactly once per send and
/// per receive in local observation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportEvent {
	pub time: DateTime<Utc>,
	pub from: NodeId,
	pub to: NodeId,
	#[serde(rename = "type")]
	pub kind: MessageKind,
	pub data: MessageData,
	pub direction: Direction,
}

impl ReportEvent {
	pub fn sent(from: NodeId, to: NodeId, message: &ElectionMessage) -> ReportEvent {
		ReportEvent {
			time: Utc::now(),
			from,
			to,
			kind: message.kind,
			data: message.data.clone(),
			direction: Direction::Sent,
		}
	}

	pub fn received(to: NodeId, message: &ElectionMessage) -> ReportEvent {
		ReportEvent {
			time: Utc::now(),
			from: message.sender,
			to,
			kind: message.kind,
			data: message.data.clone(),
			direction: Direction::Received,
		}
	}
}

/// Final node state, flushed once at shutdown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
	pub node_id: NodeId,
	pub algorithm: Algorithm,
	pub coordinator_id: Option<NodeId>,
	pub is_coordinator: bool,
}

pub trait ReportSink: Clone + Send + 'static {
	fn record(&self, event: ReportEvent) -> Result<()>;
	fn record_summary(&self, summary: NodeSummary) -> Result<()>;
}
