use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::messages::ElectionMessage;

pub mod bully;
pub mod election_loop;
pub mod heartbeat_sender;
pub mod ring;
pub mod watchdog;

/// Provides the Bully response-wait duration and the Ring circuit
/// timeout. Injectable so tests run without wall-clock-sized waits.
pub trait ElectionTimer: Send + 'static {
	fn next_timeout(&self) -> Duration;
}

/// Everything the election loop reacts to, funneled through one
/// channel so a single thread owns all state mutation.
#[derive(Clone, Debug)]
pub enum NodeEvent {
	Inbound(ElectionMessage),
	StartElection,
}

/// Cancellable one-shot timer for the election loop. Disarming swaps
/// the deadline channel for one that never fires, so a cancelled
/// timer can never deliver a stale expiry.
#[derive(Debug)]
pub struct ProtocolTimer {
	deadline_rx: Receiver<Instant>,
	armed: bool,
}

impl ProtocolTimer {
	pub fn new() -> ProtocolTimer {
		ProtocolTimer {
			deadline_rx: crossbeam_channel::never(),
			armed: false,
		}
	}

	pub fn arm(&mut self, timeout: Duration) {
		self.deadline_rx = crossbeam_channel::after(timeout);
		self.armed = true;
	}

	pub fn disarm(&mut self) {
		self.deadline_rx = crossbeam_channel::never();
		self.armed = false;
	}

	pub fn is_armed(&self) -> bool {
		self.armed
	}

	pub fn deadline_rx(&self) -> &Receiver<Instant> {
		&self.deadline_rx
	}
}
