use std::collections::HashMap;

use election::{Direction, MessageKind, NodeId, ReportEvent};

/// Post-hoc view of a captured report stream. The final coordinator
/// is derived strictly from observed COORDINATOR announcements,
/// never assumed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportAnalysis {
	pub coordinator: Option<NodeId>,
	pub message_count: usize,
	pub per_kind: HashMap<MessageKind, usize>,
	pub per_node: HashMap<NodeId, usize>,
}

impl ReportAnalysis {
	pub fn from_events(events: &[ReportEvent]) -> ReportAnalysis {
		let mut analysis = ReportAnalysis::default();
		let mut latest_announcement = None;

		for event in events {
			analysis.message_count += 1;
			*analysis.per_kind.entry(event.kind).or_insert(0) += 1;

			let observer = match event.direction {
				Direction::Sent => event.from,
				Direction::Received => event.to,
			};
			*analysis.per_node.entry(observer).or_insert(0) += 1;

			if event.kind == MessageKind::Coordinator {
				let leader = event.data.leader.unwrap_or(event.from);
				match latest_announcement {
					Some(seen) if seen >= event.time => {}
					_ => {
						latest_announcement = Some(event.time);
						analysis.coordinator = Some(leader);
					}
				}
			}
		}

		analysis
	}
}
