use std::thread;
use std::time::Duration;

pub mod cluster;

pub fn sleep_ms(milliseconds: u64) {
	thread::sleep(Duration::from_millis(milliseconds));
}
