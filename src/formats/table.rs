//! Lookup table of every notch direction and load mode for one shuttle and
//! milling angle, for printing and pinning next to the instrument.

use serde::Serialize;
use std::io::{self, Write};

use crate::core::{
    LamellaeLocation, MillingAngle, NotchDirection, OrientationRequest, OrientationResult,
    OutputFormat, ShuttleType,
};

/// One row of the lookup table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub notch: NotchDirection,
    pub lamellae: LamellaeLocation,
    #[serde(flatten)]
    pub result: OrientationResult,
}

/// All 16 (direction, location) rows, grouped by location then clockwise
pub fn orientation_table(shuttle: ShuttleType, milling_angle: MillingAngle) -> Vec<TableRow> {
    LamellaeLocation::ALL
        .into_iter()
        .flat_map(|lamellae| {
            NotchDirection::ALL.into_iter().map(move |notch| TableRow {
                notch,
                lamellae,
                result: OrientationRequest::new(notch, lamellae, milling_angle, shuttle).compute(),
            })
        })
        .collect()
}

const HEADERS: [&str; 5] = [
    "Shuttle Notch",
    "Lamellae",
    "Cassette Notch",
    "Krios Notch",
    "Krios Tilt",
];

fn cells(row: &TableRow) -> [String; 5] {
    [
        row.notch.to_string(),
        row.lamellae.to_string(),
        row.result.cassette_notch.to_string(),
        row.result.krios_notch.to_string(),
        row.result.tilt_display(),
    ]
}

/// Write the table in the requested format
pub fn write_table<W: Write>(
    writer: &mut W,
    shuttle: ShuttleType,
    milling_angle: MillingAngle,
    rows: &[TableRow],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let body: Vec<[String; 5]> = rows.iter().map(cells).collect();
            let mut widths = HEADERS.map(|h| h.chars().count());
            for line in &body {
                for (width, cell) in widths.iter_mut().zip(line.iter()) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            writeln!(writer, "{}, milling angle {}", shuttle, milling_angle)?;
            write_padded(writer, &HEADERS.map(String::from), &widths)?;
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            writeln!(writer, "{}", rule.join("  "))?;
            for line in &body {
                write_padded(writer, line, &widths)?;
            }
        }
        OutputFormat::Markdown => {
            writeln!(writer, "### {}, milling angle {}", shuttle, milling_angle)?;
            writeln!(writer)?;
            writeln!(writer, "| {} |", HEADERS.join(" | "))?;
            writeln!(writer, "|{}", "---|".repeat(HEADERS.len()))?;
            for row in rows {
                writeln!(writer, "| {} |", cells(row).join(" | "))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, rows)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_padded<W: Write>(
    writer: &mut W,
    line: &[String; 5],
    widths: &[usize; 5],
) -> io::Result<()> {
    let padded: Vec<String> = line
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    writeln!(writer, "{}", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<TableRow> {
        orientation_table(ShuttleType::Deg45, MillingAngle::new(10).unwrap())
    }

    #[test]
    fn test_table_covers_every_pair_once() {
        let rows = table();
        assert_eq!(rows.len(), 16);
        for lamellae in LamellaeLocation::ALL {
            for notch in NotchDirection::ALL {
                let matching = rows
                    .iter()
                    .filter(|r| r.notch == notch && r.lamellae == lamellae)
                    .count();
                assert_eq!(matching, 1);
            }
        }
    }

    #[test]
    fn test_table_rows_match_calculator() {
        let rows = table();
        assert_eq!(rows[0].notch, NotchDirection::Up);
        assert_eq!(rows[0].lamellae, LamellaeLocation::BottomRight);
        assert_eq!(rows[0].result.cassette_notch, NotchDirection::Right);
        assert_eq!(rows[0].result.krios_stage_tilt, 17.0);
        assert_eq!(rows[8].lamellae, LamellaeLocation::TopLeft);
        assert_eq!(rows[8].result.krios_stage_tilt, -17.0);
    }

    #[test]
    fn test_text_table_layout() {
        let rows = table();
        let mut buf = Vec::new();
        let angle = MillingAngle::new(10).unwrap();
        write_table(&mut buf, ShuttleType::Deg45, angle, &rows, OutputFormat::Text).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "45° Shuttle, milling angle 10°");
        assert!(lines[1].starts_with("Shuttle Notch  Lamellae"));
        assert_eq!(lines.len(), 3 + 16);
        assert!(lines[3].starts_with("Up "));
        assert!(lines[3].ends_with("17.0°"));
    }

    #[test]
    fn test_markdown_table() {
        let rows = table();
        let mut buf = Vec::new();
        let angle = MillingAngle::new(10).unwrap();
        write_table(&mut buf, ShuttleType::Deg45, angle, &rows, OutputFormat::Markdown).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("|---|---|---|---|---|"));
        assert!(out.contains("| Up | bottom-right | Right | Down | 17.0° |"));
        assert!(out.contains("| Up | top-left | Left | Up | -17.0° |"));
    }

    #[test]
    fn test_json_table() {
        let rows = table();
        let mut buf = Vec::new();
        let angle = MillingAngle::new(10).unwrap();
        write_table(&mut buf, ShuttleType::Deg45, angle, &rows, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 16);
        assert_eq!(array[0]["notch"], "Up");
        assert_eq!(array[0]["cassette_notch"], "Right");
    }
}
