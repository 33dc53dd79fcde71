#[macro_use]
extern crate log;
extern crate crossbeam_channel;
extern crate election;

mod cluster;
mod election_timers;
mod report;
mod transport;

pub use cluster::ClusterConfiguration;
pub use election_timers::fixed_election_timer::FixedElectionTimer;
pub use election_timers::randomized_election_timer::RandomizedElectionTimer;
pub use report::analysis::ReportAnalysis;
pub use report::json_lines::JsonLinesReportSink;
pub use report::memory::MemoryReportSink;
pub use transport::inproc::InProcTransport;
pub use transport::resolver::{AddressResolver, PrefixResolver, StaticTableResolver};
pub use transport::udp::{UdpTransport, UdpTransportConfig};
