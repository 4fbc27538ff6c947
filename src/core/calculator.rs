//! Grid orientation calculator
//!
//! Maps the notch direction observed in the FIB shuttle to the cassette and
//! Krios stage orientations, plus the Krios stage tilt. Pure functions only.
//!
//! # Steps
//!
//! 1. Cassette: rotate the shuttle notch a quarter turn, clockwise for a
//!    bottom-right (normal) load, counter-clockwise for top-left (reverse).
//! 2. Krios stage: a further quarter turn clockwise, whatever the load.
//! 3. Tilt: milling angle plus the shuttle offset, negated for a reverse load.

use log::debug;

use super::error::Result;
use super::models::{LamellaeLocation, MillingAngle, NotchDirection, OrientationResult, ShuttleType};

/// Eighth-turns from the cassette notch to the Krios stage notch
pub const KRIOS_ROTATION: i32 = 2;

/// Cassette notch index for a shuttle notch and load mode, in [0, 8)
pub fn cassette_index(notch: NotchDirection, location: LamellaeLocation) -> usize {
    notch.rotate(location.cassette_offset()).index()
}

/// Krios stage notch index for a cassette notch index, in [0, 8)
pub fn krios_index(cassette_index: usize) -> usize {
    NotchDirection::from_index(cassette_index).rotate(KRIOS_ROTATION).index()
}

/// Signed Krios stage tilt in whole degrees
pub fn krios_tilt(
    milling_angle: MillingAngle,
    shuttle: ShuttleType,
    location: LamellaeLocation,
) -> i32 {
    (milling_angle.degrees() + shuttle.offset()) * location.tilt_sign()
}

/// Compute the orientation result from validated inputs.
pub fn compute(
    notch: NotchDirection,
    location: LamellaeLocation,
    milling_angle: MillingAngle,
    shuttle: ShuttleType,
) -> OrientationResult {
    let cassette = cassette_index(notch, location);
    let krios = krios_index(cassette);
    let tilt = krios_tilt(milling_angle, shuttle, location);

    debug!(
        "orientation: notch={} ({}) location={} cassette={} krios={} tilt={}",
        notch,
        notch.index(),
        location,
        cassette,
        krios,
        tilt
    );

    OrientationResult {
        cassette_notch: NotchDirection::from_index(cassette),
        krios_notch: NotchDirection::from_index(krios),
        krios_stage_tilt: f64::from(tilt),
    }
}

/// Compute with a raw integer milling angle, rejecting values outside [0, 90].
pub fn compute_checked(
    notch: NotchDirection,
    location: LamellaeLocation,
    milling_angle: i64,
    shuttle: ShuttleType,
) -> Result<OrientationResult> {
    let angle = MillingAngle::new(milling_angle)?;
    Ok(compute(notch, location, angle, shuttle))
}

/// Compute from form labels, e.g. `("Up", "bottom-right", 10, "45")`.
///
/// Fields are validated in argument order; the first invalid one decides the
/// error kind and no partial result is returned.
pub fn compute_from_labels(
    notch: &str,
    location: &str,
    milling_angle: i64,
    shuttle: &str,
) -> Result<OrientationResult> {
    let notch = NotchDirection::parse(notch)?;
    let location = LamellaeLocation::parse(location)?;
    let angle = MillingAngle::new(milling_angle)?;
    let shuttle = ShuttleType::parse(shuttle)?;
    Ok(compute(notch, location, angle, shuttle))
}
