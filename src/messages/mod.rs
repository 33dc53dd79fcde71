use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Wire message kinds. ALIVE is the Bully "OK" response.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageKind {
	Election,
	Alive,
	Coordinator,
	Token,
	Heartbeat,
}

impl fmt::Display for MessageKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			MessageKind::Election => "ELECTION",
			MessageKind::Alive => "ALIVE",
			MessageKind::Coordinator => "COORDINATOR",
			MessageKind::Token => "TOKEN",
			MessageKind::Heartbeat => "HEARTBEAT",
		};
		write!(f, "{}", name)
	}
}

/// Algorithm-specific payload. COORDINATOR carries `leader`,
/// TOKEN carries the accumulated `participants` list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub leader: Option<NodeId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub participants: Option<Vec<NodeId>>,
}

impl MessageData {
	pub fn empty() -> MessageData {
		MessageData::default()
	}

	pub fn with_leader(leader: NodeId) -> MessageData {
		MessageData {
			leader: Some(leader),
			participants: None,
		}
	}

	pub fn with_participants(participants: Vec<NodeId>) -> MessageData {
		MessageData {
			leader: None,
			participants: Some(participants),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectionMessage {
	#[serde(rename = "type")]
	pub kind: MessageKind,
	pub sender: NodeId,
	pub timestamp: DateTime<Utc>,
	pub data: MessageData,
}

impl ElectionMessage {
	fn new(kind: MessageKind, sender: NodeId, data: MessageData) -> ElectionMessage {
		ElectionMessage {
			kind,
			sender,
			timestamp: Utc::now(),
			data,
		}
	}

	pub fn election(sender: NodeId) -> ElectionMessage {
		ElectionMessage::new(MessageKind::Election, sender, MessageData::empty())
	}

	pub fn alive(sender: NodeId) -> ElectionMessage {
		ElectionMessage::new(MessageKind::Alive, sender, MessageData::empty())
	}

	pub fn coordinator(sender: NodeId, leader: NodeId) -> ElectionMessage {
		ElectionMessage::new(
			MessageKind::Coordinator,
			sender,
			MessageData::with_leader(leader),
		)
	}

	pub fn token(sender: NodeId, participants: Vec<NodeId>) -> ElectionMessage {
		ElectionMessage::new(
			MessageKind::Token,
			sender,
			MessageData::with_participants(participants),
		)
	}

	pub fn heartbeat(sender: NodeId) -> ElectionMessage {
		ElectionMessage::new(MessageKind::Heartbeat, sender, MessageData::empty())
	}

	/// Leader announced by a COORDINATOR message. Falls back to the
	/// sender id for announcements without an explicit payload.
	pub fn announced_leader(&self) -> NodeId {
		self.data.leader.unwrap_or(self.sender)
	}
}

impl fmt::Display for ElectionMessage {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} from Node {}", self.kind, self.sender)
	}
}
