pub mod bully_convergence;
pub mod coordinator_failover;
pub mod ring_circulation;
