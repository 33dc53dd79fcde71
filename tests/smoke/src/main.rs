#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

extern crate cases;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

fn init_logger() {
	env_logger::builder()
		.format(|buf, record| {
			let now: DateTime<Local> = Local::now();
			let now_str = now.format("%H:%M:%S.%3f").to_string();
			writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
		})
		.init();
}

fn main() {
	init_logger();

	info!("Stand-alone smoke test started");

	cases::cases::bully_convergence::run();

	info!("Stand-alone smoke test completed");
}
