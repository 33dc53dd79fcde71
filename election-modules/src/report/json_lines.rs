use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use election::{new_err, ElectionError, NodeSummary, ReportEvent, ReportSink};
use parking_lot::Mutex;
use serde_json::json;

/// Append-only report stream: one JSON object per line, consumed by
/// external analysis tooling. Flushed per record so a killed process
/// loses at most the record being written.
#[derive(Clone, Debug)]
pub struct JsonLinesReportSink {
	writer: Arc<Mutex<BufWriter<File>>>,
}

impl JsonLinesReportSink {
	pub fn create<P: AsRef<Path>>(path: P) -> Result<JsonLinesReportSink, ElectionError> {
		let file = match File::create(&path) {
			Ok(file) => file,
			Err(err) => {
				return new_err(
					format!("Cannot create report file {}", path.as_ref().display()),
					err.to_string(),
				)
			}
		};

		Ok(JsonLinesReportSink {
			writer: Arc::new(Mutex::new(BufWriter::new(file))),
		})
	}

	fn write_line(&self, value: serde_json::Value) -> Result<(), ElectionError> {
		let mut writer = self.writer.lock();

		let write_result = serde_json::to_writer(&mut *writer, &value)
			.map_err(|err| err.to_string())
			.and_then(|_| writer.write_all(b"\n").map_err(|err| err.to_string()))
			.and_then(|_| writer.flush().map_err(|err| err.to_string()));

		if let Err(cause) = write_result {
			return new_err("Cannot write report line".to_string(), cause);
		}

		Ok(())
	}
}

impl ReportSink for JsonLinesReportSink {
	fn record(&self, event: ReportEvent) -> Result<(), ElectionError> {
		match serde_json::to_value(&event) {
			Ok(value) => self.write_line(value),
			Err(err) => new_err("Cannot encode report event".to_string(), err.to_string()),
		}
	}

	fn record_summary(&self, summary: NodeSummary) -> Result<(), ElectionError> {
		self.write_line(json!({ "summary": summary }))
	}
}
