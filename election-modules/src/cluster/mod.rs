use election::Cluster;

/// Fixed-size cluster with node ids `[0, node_count)`, agreed by all
/// nodes at startup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClusterConfiguration {
	node_count: u64,
}

impl ClusterConfiguration {
	pub fn new(node_count: u64) -> ClusterConfiguration {
		if node_count == 0 {
			panic!("Invalid cluster configuration: node_count = 0")
		}

		ClusterConfiguration { node_count }
	}
}

impl Cluster for ClusterConfiguration {
	fn size(&self) -> u64 {
		self.node_count
	}
}
