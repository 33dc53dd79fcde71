use crossbeam_channel::{Receiver, Sender};

use crate::communication::Transport;
use crate::leadership::NodeEvent;
use crate::report::{ReportEvent, ReportSink};
use crate::NodeId;

pub struct ListenerParams<Tr, Rs>
where
	Tr: Transport,
	Rs: ReportSink,
{
	pub node_id: NodeId,
	pub transport: Tr,
	pub report_sink: Rs,
	pub event_tx: Sender<NodeEvent>,
}

/// Surfaces inbound transport messages to the election loop. Each
/// received message is mirrored to the report sink exactly once,
/// in the order observed.
pub fn listen_inbound<Tr, Rs>(params: ListenerParams<Tr, Rs>, terminate_worker_rx: Receiver<()>)
where
	Tr: Transport,
	Rs: ReportSink,
{
	info!("Node {} inbound message listener started", params.node_id);

	let inbound_rx = params.transport.message_rx(params.node_id);

	loop {
		select!(
			recv(terminate_worker_rx) -> res => {
				if res.is_err() {
					error!("Abnormal exit for inbound message listener");
				}
				break
			},
			recv(inbound_rx) -> res => {
				let message = match res {
					Ok(message) => message,
					Err(_) => {
						warn!("Node {} transport channel closed", params.node_id);
						break
					}
				};

				trace!("Node {} received {}", params.node_id, message);

				let event = ReportEvent::received(params.node_id, &message);
				if let Err(err) = params.report_sink.record(event) {
					error!("Node {} cannot record receive event: {}", params.node_id, err);
				}

				if params.event_tx.send(NodeEvent::Inbound(message)).is_err() {
					warn!("Node {} election loop is gone", params.node_id);
					break
				}
			},
		);
	}

	info!("Node {} inbound message listener stopped", params.node_id);
}
