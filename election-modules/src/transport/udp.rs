use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Receiver;
use election::{new_err, ElectionError, ElectionMessage, NodeId, Transport};

use crate::transport::resolver::AddressResolver;

const MAX_DATAGRAM_SIZE: usize = 4096;

#[derive(Clone, Copy, Debug)]
pub struct UdpTransportConfig {
	/// Bounded receive poll so the reader stays responsive to shutdown.
	pub read_timeout: Duration,
	/// Bounded retry count for transient send failures.
	pub send_retries: u32,
	pub send_retry_backoff: Duration,
}

impl Default for UdpTransportConfig {
	fn default() -> UdpTransportConfig {
		UdpTransportConfig {
			read_timeout: Duration::from_millis(250),
			send_retries: 2,
			send_retry_backoff: Duration::from_millis(50),
		}
	}
}

struct Inner {
	node_id: NodeId,
	socket: UdpSocket,
	inbound_rx: Receiver<ElectionMessage>,
	running: Arc<AtomicBool>,
}

impl Drop for Inner {
	fn drop(&mut self) {
		self.running.store(false, Ordering::SeqCst);
	}
}

/// JSON-datagram transport. No delivery or cross-peer ordering
/// guarantee; malformed datagrams are dropped and logged.
#[derive(Clone)]
pub struct UdpTransport<R>
where
	R: AddressResolver,
{
	inner: Arc<Inner>,
	resolver: R,
	config: UdpTransportConfig,
}

impl<R> UdpTransport<R>
where
	R: AddressResolver,
{
	/// Binds the node's datagram socket and starts the reader thread.
	pub fn bind(
		node_id: NodeId,
		bind_address: &str,
		resolver: R,
		config: UdpTransportConfig,
	) -> Result<UdpTransport<R>, ElectionError> {
		let socket = match UdpSocket::bind(bind_address) {
			Ok(socket) => socket,
			Err(err) => {
				return new_err(format!("Cannot bind to {}", bind_address), err.to_string())
			}
		};

		if let Err(err) = socket.set_read_timeout(Some(config.read_timeout)) {
			return new_err("Cannot set read timeout".to_string(), err.to_string());
		}

		let reader_socket = match socket.try_clone() {
			Ok(reader_socket) => reader_socket,
			Err(err) => return new_err("Cannot clone socket".to_string(), err.to_string()),
		};

		let (inbound_tx, inbound_rx) = crossbeam_channel::unbounded();
		let running = Arc::new(AtomicBool::new(true));
		let reader_running = running.clone();

		thread::spawn(move || {
			let mut buffer = [0u8; MAX_DATAGRAM_SIZE];

			while reader_running.load(Ordering::SeqCst) {
				let received = match reader_socket.recv_from(&mut buffer) {
					Ok((byte_count, _)) => byte_count,
					Err(err) => {
						if err.kind() != std::io::ErrorKind::WouldBlock
							&& err.kind() != std::io::ErrorKind::TimedOut
						{
							warn!("Node {} receive error: {}", node_id, err);
						}
						continue;
					}
				};

				match serde_json::from_slice::<ElectionMessage>(&buffer[..received]) {
					Ok(message) => {
						if inbound_tx.send(message).is_err() {
							break;
						}
					}
					Err(err) => {
						error!("Node {} dropping malformed datagram: {}", node_id, err);
					}
				}
			}

			info!("Node {} transport reader stopped", node_id);
		});

		info!("Node {} transport bound to {}", node_id, bind_address);

		Ok(UdpTransport {
			inner: Arc::new(Inner {
				node_id,
				socket,
				inbound_rx,
				running,
			}),
			resolver,
			config,
		})
	}
}

impl<R> Transport for UdpTransport<R>
where
	R: AddressResolver,
{
	fn send(&self, destination_node_id: NodeId, message: ElectionMessage) -> Result<(), ElectionError> {
		let address = self.resolver.resolve(destination_node_id);
		let bytes = match serde_json::to_vec(&message) {
			Ok(bytes) => bytes,
			Err(err) => return new_err("Cannot encode message".to_string(), err.to_string()),
		};

		let mut last_error = String::new();
		for attempt in 0..=self.config.send_retries {
			if attempt > 0 {
				thread::sleep(self.config.send_retry_backoff);
			}

			match self.inner.socket.send_to(&bytes, &address) {
				Ok(_) => return Ok(()),
				Err(err) => {
					last_error = err.to_string();
					debug!(
						"Node {} send attempt {} to Node {} at {} failed: {}",
						self.inner.node_id, attempt, destination_node_id, address, err
					);
				}
			}
		}

		new_err(
			format!(
				"Send to Node {} at {} abandoned after {} retries",
				destination_node_id, address, self.config.send_retries
			),
			last_error,
		)
	}

	fn message_rx(&self, node_id: NodeId) -> Receiver<ElectionMessage> {
		debug_assert_eq!(node_id, self.inner.node_id);

		self.inner.inbound_rx.clone()
	}
}
