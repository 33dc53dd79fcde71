#[macro_use] extern crate log;
extern crate chrono;
extern crate crossbeam_channel;
extern crate ctrlc;
extern crate env_logger;

extern crate election;
extern crate election_modules;

use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use chrono::prelude::{DateTime, Local};
use crossbeam_channel::Receiver;

use election::{Algorithm, NodeConfiguration, NodeTimings};
use election_modules::{
	ClusterConfiguration, FixedElectionTimer, JsonLinesReportSink, PrefixResolver, UdpTransport,
	UdpTransportConfig,
};

fn init_logger() {
	env_logger::builder()
		.format(|buf, record| {
			let now: DateTime<Local> = Local::now();
			writeln!(
				buf,
				"{:5}: {} - {}",
				record.level(),
				now.format("%H:%M:%S.%3f"),
				record.args()
			)
		})
		.init();
}

struct EnvConfig {
	node_id: u64,
	node_count: u64,
	algorithm: Algorithm,
	host_prefix: String,
	base_port: u16,
	initiator: bool,
	report_path: String,
	run_for_secs: Option<u64>,
	response_timeout_ms: u64,
}

impl EnvConfig {
	fn from_env() -> EnvConfig {
		EnvConfig {
			node_id: env_parse("NODE_ID", 0),
			node_count: env_parse("NODE_COUNT", 5),
			algorithm: std::env::var("ALGORITHM")
				.ok()
				.and_then(|value| Algorithm::from_str(&value).ok())
				.unwrap_or(Algorithm::Bully),
			host_prefix: std::env::var("HOST_PREFIX").unwrap_or_else(|_| "node-".to_string()),
			base_port: env_parse("BASE_PORT", 9000),
			initiator: std::env::var("INITIATOR").map(|value| value == "1").unwrap_or(false),
			report_path: std::env::var("REPORT_PATH")
				.unwrap_or_else(|_| "/tmp/election-report.jsonl".to_string()),
			run_for_secs: std::env::var("RUN_FOR_SECS")
				.ok()
				.and_then(|value| value.parse().ok()),
			response_timeout_ms: env_parse("RESPONSE_TIMEOUT_MS", 2000),
		}
	}
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
	std::env::var(name)
		.ok()
		.and_then(|value| value.parse().ok())
		.unwrap_or(default)
}

fn main() {
	init_logger();

	let config = EnvConfig::from_env();

	info!(
		"Starting Node {} of {} ({} algorithm)",
		config.node_id, config.node_count, config.algorithm
	);

	let resolver = PrefixResolver::new(config.host_prefix.clone(), config.base_port);
	let bind_address = format!("0.0.0.0:{}", config.base_port + config.node_id as u16);

	let transport = UdpTransport::bind(
		config.node_id,
		&bind_address,
		resolver,
		UdpTransportConfig::default(),
	)
	.unwrap_or_else(|err| panic!("Cannot start transport: {}", err));

	let report_sink = JsonLinesReportSink::create(&config.report_path)
		.unwrap_or_else(|err| panic!("Cannot create report sink: {}", err));

	let node_config = NodeConfiguration {
		node_id: config.node_id,
		algorithm: config.algorithm,
		initiator: config.initiator,
		cluster: ClusterConfiguration::new(config.node_count),
		transport,
		election_timer: FixedElectionTimer::new(config.response_timeout_ms),
		report_sink,
		timings: NodeTimings::default(),
	};

	let node_worker = election::start_node(node_config);

	let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
	ctrlc::set_handler(move || {
		let _ = shutdown_tx.send(());
	})
	.unwrap_or_else(|err| panic!("Cannot install shutdown handler: {}", err));

	await_shutdown(
		&shutdown_rx,
		config.run_for_secs.map(Duration::from_secs),
	);

	let status = node_worker.status();
	info!(
		"Node {} shutting down, final coordinator: {:?}",
		config.node_id, status.coordinator_id
	);
	node_worker.terminate();
}

/// Blocks until a shutdown signal arrives or, when a run limit is
/// configured, until that much time has passed.
fn await_shutdown(shutdown_rx: &Receiver<()>, run_for: Option<Duration>) {
	match run_for {
		Some(limit) => {
			let _ = shutdown_rx.recv_timeout(limit);
		}
		None => {
			if shutdown_rx.recv().is_err() {
				error!("Shutdown handler is gone");
			}
		}
	}
}
