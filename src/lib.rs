//! fib2tem - Grid orientation assistant
//!
//! Converts the notch direction observed on a FIB shuttle into the notch
//! direction in the transport cassette, and the notch direction plus tilt
//! angle on the Titan Krios stage.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/fib2tem.rs**: Thin wrapper that calls the library
//!
//! ```
//! use fib2tem::{compute_from_labels, NotchDirection};
//!
//! let result = compute_from_labels("Up", "bottom-right", 10, "45").unwrap();
//! assert_eq!(result.cassette_notch, NotchDirection::Right);
//! assert_eq!(result.krios_notch, NotchDirection::Down);
//! assert_eq!(result.tilt_display(), "17.0°");
//! ```

pub mod core;
pub mod formats;
pub mod batch;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::{
    compute, compute_checked, compute_from_labels, Config, LamellaeLocation, MillingAngle,
    NotchDirection, OrientationError, OrientationRequest, OrientationResult, OutputFormat, Result,
    ShuttleType,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the fib2tem library
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "1.0.0");
    }

    #[test]
    fn test_reexports() {
        let request = OrientationRequest::new(
            NotchDirection::Up,
            LamellaeLocation::BottomRight,
            MillingAngle::new(10).unwrap(),
            ShuttleType::Deg45,
        );
        let direct = compute(
            NotchDirection::Up,
            LamellaeLocation::BottomRight,
            MillingAngle::new(10).unwrap(),
            ShuttleType::Deg45,
        );
        assert_eq!(request.compute(), direct);
    }
}
