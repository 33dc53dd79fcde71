use std::collections::HashMap;

use election::NodeId;

/// Maps a node id to a network address. Injectable so deployments can
/// swap naming schemes without touching the transport.
pub trait AddressResolver: Clone + Send + 'static {
	fn resolve(&self, node_id: NodeId) -> String;
}

/// Container-style naming: `host-prefix + id`, port `base_port + id`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrefixResolver {
	host_prefix: String,
	base_port: u16,
}

impl PrefixResolver {
	pub fn new(host_prefix: String, base_port: u16) -> PrefixResolver {
		PrefixResolver {
			host_prefix,
			base_port,
		}
	}
}

impl AddressResolver for PrefixResolver {
	fn resolve(&self, node_id: NodeId) -> String {
		format!(
			"{}{}:{}",
			self.host_prefix,
			node_id,
			self.base_port + node_id as u16
		)
	}
}

/// Explicit node-to-address table.
#[derive(Clone, Debug, Default)]
pub struct StaticTableResolver {
	table: HashMap<NodeId, String>,
}

impl StaticTableResolver {
	pub fn new(table: HashMap<NodeId, String>) -> StaticTableResolver {
		StaticTableResolver { table }
	}

	pub fn add_node(&mut self, node_id: NodeId, address: String) {
		self.table.insert(node_id, address);
	}
}

impl AddressResolver for StaticTableResolver {
	fn resolve(&self, node_id: NodeId) -> String {
		match self.table.get(&node_id) {
			Some(address) => address.clone(),
			None => {
				error!("No address for Node {}", node_id);
				String::new()
			}
		}
	}
}
