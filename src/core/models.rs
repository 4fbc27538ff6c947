//! Core data models for fib2tem
//!
//! The four calculator inputs and the result triple. Every input type parses
//! from the labels an operator would type or pick on the form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{OrientationError, Result};

/// Normalise a user label: trim, lowercase, `_`/space become `-`, degree signs dropped
fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', ' '], "-")
        .replace('°', "")
}

// =============================================================================
// Notch Direction
// =============================================================================

/// Number of positions on the notch compass
pub const NOTCH_POSITIONS: usize = 8;

/// Notch orientation, one of eight compass-like positions in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotchDirection {
    Up,
    #[serde(rename = "Up-Right")]
    UpRight,
    Right,
    #[serde(rename = "Down-Right")]
    DownRight,
    Down,
    #[serde(rename = "Down-Left")]
    DownLeft,
    Left,
    #[serde(rename = "Up-Left")]
    UpLeft,
}

impl NotchDirection {
    /// All directions, clockwise from Up. Position in this array is the index.
    pub const ALL: [NotchDirection; NOTCH_POSITIONS] = [
        NotchDirection::Up,
        NotchDirection::UpRight,
        NotchDirection::Right,
        NotchDirection::DownRight,
        NotchDirection::Down,
        NotchDirection::DownLeft,
        NotchDirection::Left,
        NotchDirection::UpLeft,
    ];

    /// 0-based clockwise index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction at a clockwise index, wrapping modulo 8
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % NOTCH_POSITIONS]
    }

    /// Rotate by `steps` eighth-turns; positive is clockwise
    pub fn rotate(self, steps: i32) -> Self {
        let positions = NOTCH_POSITIONS as i32;
        let index = (self.index() as i32 + steps.rem_euclid(positions)).rem_euclid(positions);
        Self::ALL[index as usize]
    }

    /// Display label as shown on the form
    pub fn label(self) -> &'static str {
        match self {
            NotchDirection::Up => "Up",
            NotchDirection::UpRight => "Up-Right",
            NotchDirection::Right => "Right",
            NotchDirection::DownRight => "Down-Right",
            NotchDirection::Down => "Down",
            NotchDirection::DownLeft => "Down-Left",
            NotchDirection::Left => "Left",
            NotchDirection::UpLeft => "Up-Left",
        }
    }

    /// Parse a direction from a label ("Up-Right", "up_right", "ur", ...)
    pub fn parse(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "up" | "u" => Ok(NotchDirection::Up),
            "up-right" | "upright" | "ur" => Ok(NotchDirection::UpRight),
            "right" | "r" => Ok(NotchDirection::Right),
            "down-right" | "downright" | "dr" => Ok(NotchDirection::DownRight),
            "down" | "d" => Ok(NotchDirection::Down),
            "down-left" | "downleft" | "dl" => Ok(NotchDirection::DownLeft),
            "left" | "l" => Ok(NotchDirection::Left),
            "up-left" | "upleft" | "ul" => Ok(NotchDirection::UpLeft),
            _ => Err(OrientationError::InvalidNotchDirection { value: s.to_string() }),
        }
    }
}

impl fmt::Display for NotchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NotchDirection {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// =============================================================================
// Lamellae Location
// =============================================================================

/// Where the lamellae sit on the shuttle when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LamellaeLocation {
    /// Normal Load
    BottomRight,
    /// Reverse Load
    TopLeft,
}

impl LamellaeLocation {
    pub const ALL: [LamellaeLocation; 2] =
        [LamellaeLocation::BottomRight, LamellaeLocation::TopLeft];

    /// Cassette rotation in eighth-turns: a quarter turn clockwise or counter-clockwise
    pub fn cassette_offset(self) -> i32 {
        match self {
            LamellaeLocation::BottomRight => 2,
            LamellaeLocation::TopLeft => -2,
        }
    }

    /// Sign applied to the Krios stage tilt
    pub fn tilt_sign(self) -> i32 {
        match self {
            LamellaeLocation::BottomRight => 1,
            LamellaeLocation::TopLeft => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LamellaeLocation::BottomRight => "bottom-right",
            LamellaeLocation::TopLeft => "top-left",
        }
    }

    /// Operator-facing name of the load mode
    pub fn load_label(self) -> &'static str {
        match self {
            LamellaeLocation::BottomRight => "Normal Load",
            LamellaeLocation::TopLeft => "Reverse Load",
        }
    }

    /// Parse a location ("bottom-right", "br", "normal", "top-left", "reverse", ...)
    pub fn parse(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "bottom-right" | "bottomright" | "br" | "normal" | "normal-load" => {
                Ok(LamellaeLocation::BottomRight)
            }
            "top-left" | "topleft" | "tl" | "reverse" | "reverse-load" => {
                Ok(LamellaeLocation::TopLeft)
            }
            _ => Err(OrientationError::InvalidLamellaeLocation { value: s.to_string() }),
        }
    }
}

impl fmt::Display for LamellaeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LamellaeLocation {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// =============================================================================
// Shuttle Type
// =============================================================================

/// Mechanical tilt geometry of the FIB shuttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShuttleType {
    #[serde(rename = "45")]
    Deg45,
    #[serde(rename = "35")]
    Deg35,
}

impl ShuttleType {
    pub const ALL: [ShuttleType; 2] = [ShuttleType::Deg45, ShuttleType::Deg35];

    /// Degrees added to the milling angle to get the stage tilt magnitude
    pub fn offset(self) -> i32 {
        match self {
            ShuttleType::Deg45 => 7,
            ShuttleType::Deg35 => 3,
        }
    }

    /// The "45" / "35" code
    pub fn label(self) -> &'static str {
        match self {
            ShuttleType::Deg45 => "45",
            ShuttleType::Deg35 => "35",
        }
    }

    /// Parse "45", "45°", "35deg", ...
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = normalize_label(s);
        match normalized.trim_end_matches("deg") {
            "45" => Ok(ShuttleType::Deg45),
            "35" => Ok(ShuttleType::Deg35),
            _ => Err(OrientationError::InvalidShuttleType { value: s.to_string() }),
        }
    }
}

impl fmt::Display for ShuttleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° Shuttle", self.label())
    }
}

impl FromStr for ShuttleType {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// =============================================================================
// Milling Angle
// =============================================================================

/// Milling angle in whole degrees, guaranteed to lie in [0, 90].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MillingAngle(u8);

impl MillingAngle {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 90;
    /// Value the input form starts with
    pub const DEFAULT: MillingAngle = MillingAngle(10);

    pub fn new(degrees: i64) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&degrees) {
            Ok(MillingAngle(degrees as u8))
        } else {
            Err(OrientationError::MillingAngleOutOfRange { angle: degrees })
        }
    }

    pub fn degrees(self) -> i32 {
        i32::from(self.0)
    }
}

impl Default for MillingAngle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for MillingAngle {
    type Error = OrientationError;

    fn try_from(degrees: i64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl<'de> Deserialize<'de> for MillingAngle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let degrees = i64::deserialize(deserializer)?;
        MillingAngle::new(degrees).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for MillingAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// How results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered labeled lines (default)
    #[default]
    Text,
    /// Markdown with bold labels
    Markdown,
    /// One JSON object
    Json,
}

impl OutputFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "plain" => Some(OutputFormat::Text),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

// =============================================================================
// Orientation Result
// =============================================================================

/// Output of one calculation: where the notch ends up and how far to tilt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrientationResult {
    /// Notch direction once the shuttle sits in the cassette
    pub cassette_notch: NotchDirection,
    /// Notch direction on the Krios stage
    pub krios_notch: NotchDirection,
    /// Krios stage tilt in degrees (always a whole number)
    pub krios_stage_tilt: f64,
}

impl OrientationResult {
    /// Tilt with exactly one decimal place and a degree sign, e.g. `-13.0°`
    pub fn tilt_display(&self) -> String {
        format!("{:.1}°", self.krios_stage_tilt)
    }
}
