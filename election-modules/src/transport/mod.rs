pub mod inproc;
pub mod resolver;
pub mod udp;
