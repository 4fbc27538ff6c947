//! Result report writer
//!
//! Renders one calculation in text, markdown or JSON. Uses only
//! `std::io::Write`, so the same code serves stdout and the wasm binding.

use serde::Serialize;
use std::io::{self, Write};

use crate::core::{OrientationRequest, OrientationResult, OutputFormat};

pub const CASSETTE_LABEL: &str = "1. Cassette Notch Direction";
pub const KRIOS_NOTCH_LABEL: &str = "2. Krios Stage Notch Direction";
pub const KRIOS_TILT_LABEL: &str = "3. Krios Stage Tilt Angle";

/// JSON shape: the result fields plus the echoed request
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a OrientationResult,
    input: &'a OrientationRequest,
}

/// Write a result report in the requested format
pub fn write_result<W: Write>(
    writer: &mut W,
    request: &OrientationRequest,
    result: &OrientationResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "Results:")?;
            writeln!(writer, "{}: {}", CASSETTE_LABEL, result.cassette_notch)?;
            writeln!(writer, "{}: {}", KRIOS_NOTCH_LABEL, result.krios_notch)?;
            writeln!(writer, "{}: {}", KRIOS_TILT_LABEL, result.tilt_display())?;
        }
        OutputFormat::Markdown => {
            writeln!(writer, "## Results")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "_{} notch, {}, {} milling angle, {}_",
                request.notch,
                request.lamellae.load_label(),
                request.milling_angle,
                request.shuttle
            )?;
            writeln!(writer)?;
            writeln!(writer, "- **{}:** {}", CASSETTE_LABEL, result.cassette_notch)?;
            writeln!(writer, "- **{}:** {}", KRIOS_NOTCH_LABEL, result.krios_notch)?;
            writeln!(writer, "- **{}:** {}", KRIOS_TILT_LABEL, result.tilt_display())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, &JsonReport { result, input: request })?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Render a result report to a string
pub fn render_result(
    request: &OrientationRequest,
    result: &OrientationResult,
    format: OutputFormat,
) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_result(&mut buf, request, result, format);
    String::from_utf8_lossy(&buf).into_owned()
}
