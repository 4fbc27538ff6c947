//! Batch evaluation over JSON lines
//!
//! Reads one request per line and writes one response per line:
//!
//! ```text
//! {"notch":"Up","lamellae":"bottom-right","milling_angle":10,"shuttle":"45"}
//! -> {"line":1,"result":{"cassette_notch":"Right","krios_notch":"Down","krios_stage_tilt":17.0}}
//! ```
//!
//! A bad line produces `{"line":N,"error":"..."}` and processing continues.

use log::{info, warn};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

use crate::core::{LabelRequest, Result, ResultExt};

/// Counts from one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-empty lines seen
    pub processed: usize,
    /// Lines answered with an error
    pub failed: usize,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.processed - self.failed
    }
}

fn evaluate_line(bytes: Vec<u8>) -> Result<Value> {
    let line = String::from_utf8(bytes)?;
    let raw: LabelRequest = serde_json::from_str(&line)?;
    let result = raw.parse()?.compute();
    Ok(serde_json::to_value(result)?)
}

/// Run every line of `reader` through the calculator, writing responses to `writer`.
///
/// Only I/O failures abort the run; invalid requests, including lines that
/// are not valid UTF-8, are reported inline.
pub fn run_batch<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let mut bytes = bytes?;
        let line_no = index + 1;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        summary.processed += 1;

        let response = match evaluate_line(bytes).context(format!("line {}", line_no)) {
            Ok(result) => json!({ "line": line_no, "result": result }),
            Err(e) => {
                if e.is_input_error() {
                    info!("batch rejected {}", e);
                } else {
                    warn!("batch skipped {}", e);
                }
                summary.failed += 1;
                json!({ "line": line_no, "error": e.to_string() })
            }
        };

        writeln!(writer, "{}", response)?;
    }

    writer.flush()?;
    Ok(summary)
}
