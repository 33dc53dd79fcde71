use chrono::{Duration as ChronoDuration, Utc};

use crate::messages::MessageKind;
use crate::node::configuration::Algorithm;
use crate::report::Direction;
use crate::test_support::test_node;

#[test]
fn announcement_applies_and_derives_is_coordinator() {
	let mut fixture = test_node(2, 5, Algorithm::Bully);

	let applied = fixture.node.apply_coordinator(4, Utc::now());

	assert!(applied);
	assert_eq!(fixture.node.coordinator_id(), Some(4));
	assert!(!fixture.node.is_coordinator());
	assert!(!fixture.node.election_in_progress());
}

#[test]
fn stale_announcement_never_regresses_coordinator() {
	let mut fixture = test_node(2, 5, Algorithm::Bully);

	let newer = Utc::now();
	let older = newer - ChronoDuration::seconds(5);

	assert!(fixture.node.apply_coordinator(4, newer));
	assert!(!fixture.node.apply_coordinator(3, older));

	assert_eq!(fixture.node.coordinator_id(), Some(4));
}

#[test]
fn duplicate_announcement_is_a_no_op() {
	let mut fixture = test_node(4, 5, Algorithm::Bully);

	let announced_at = Utc::now();

	assert!(fixture.node.apply_coordinator(4, announced_at));
	assert_eq!(fixture.initial_heartbeat_rx.try_recv().is_ok(), true);

	assert!(!fixture.node.apply_coordinator(4, announced_at));
	// No second initial-heartbeat trigger for the duplicate.
	assert!(fixture.initial_heartbeat_rx.try_recv().is_err());
}

#[test]
fn newer_announcement_for_same_leader_does_not_retrigger_heartbeat() {
	let mut fixture = test_node(4, 5, Algorithm::Bully);

	assert!(fixture.node.apply_coordinator(4, Utc::now()));
	assert!(fixture.initial_heartbeat_rx.try_recv().is_ok());

	assert!(fixture
		.node
		.apply_coordinator(4, Utc::now() + ChronoDuration::seconds(1)));
	assert!(fixture.initial_heartbeat_rx.try_recv().is_err());
}

#[test]
fn begin_election_guards_against_reentry() {
	let mut fixture = test_node(0, 3, Algorithm::Bully);

	assert!(fixture.node.begin_election());
	assert!(!fixture.node.begin_election());

	fixture.node.abandon_election();
	assert!(fixture.node.begin_election());
}

#[test]
fn heartbeat_from_non_coordinator_is_ignored() {
	let mut fixture = test_node(1, 5, Algorithm::Bully);
	fixture.node.apply_coordinator(4, Utc::now());

	let before = fixture.node.heartbeat_elapsed();
	std::thread::sleep(std::time::Duration::from_millis(20));

	fixture.node.observe_heartbeat(3);
	assert!(fixture.node.heartbeat_elapsed() >= before);

	fixture.node.observe_heartbeat(4);
	assert!(fixture.node.heartbeat_elapsed() < std::time::Duration::from_millis(10));
}

#[test]
fn announce_coordinator_broadcasts_to_every_peer() {
	let mut fixture = test_node(2, 4, Algorithm::Ring);

	fixture.node.announce_coordinator(3);

	let sent = fixture.transport.sent_messages();
	let mut destinations: Vec<u64> = sent.iter().map(|(to, _)| *to).collect();
	destinations.sort();

	assert_eq!(destinations, vec![0, 1, 3]);
	for (_, message) in &sent {
		assert_eq!(message.kind, MessageKind::Coordinator);
		assert_eq!(message.announced_leader(), 3);
	}
	assert_eq!(fixture.node.coordinator_id(), Some(3));
}

#[test]
fn sends_are_mirrored_to_the_report_sink() {
	let mut fixture = test_node(0, 3, Algorithm::Bully);

	fixture.node.announce_coordinator(0);

	let events = fixture.sink.recorded_events();
	assert_eq!(events.len(), 2);
	for event in &events {
		assert_eq!(event.direction, Direction::Sent);
		assert_eq!(event.from, 0);
		assert_eq!(event.kind, MessageKind::Coordinator);
	}
}

#[test]
fn summary_reflects_final_state() {
	let mut fixture = test_node(3, 4, Algorithm::Ring);
	fixture.node.apply_coordinator(3, Utc::now());

	fixture.node.flush_summary();

	let summaries = fixture.sink.summaries.lock().unwrap();
	assert_eq!(summaries.len(), 1);
	assert_eq!(summaries[0].node_id, 3);
	assert_eq!(summaries[0].coordinator_id, Some(3));
	assert!(summaries[0].is_coordinator);
}
