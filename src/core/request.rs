//! Calculation requests
//!
//! A request is built fresh for every calculation attempt. The builder accepts
//! selections the way an input form hands them over (possibly the same field
//! ticked twice, possibly not at all) and refuses to build until exactly one
//! value is chosen per field. The built request is immutable.

use serde::{Deserialize, Serialize};

use super::calculator;
use super::error::{OrientationError, Result};
use super::models::{LamellaeLocation, MillingAngle, NotchDirection, OrientationResult, ShuttleType};

const NOTCH_FIELD: &str = "notch direction";
const LAMELLAE_FIELD: &str = "lamella location";
const SHUTTLE_FIELD: &str = "shuttle type";

/// One form field's selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection<T> {
    Empty,
    One(T),
    Conflict,
}

// Not derived: the derive bounds on `T: Default`, which the enums lack.
impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Empty
    }
}

impl<T: PartialEq> Selection<T> {
    fn select(self, value: T) -> Self {
        match self {
            Selection::Empty => Selection::One(value),
            Selection::One(current) if current == value => Selection::One(current),
            _ => Selection::Conflict,
        }
    }

    fn resolve(self, field: &'static str) -> Result<T> {
        match self {
            Selection::One(value) => Ok(value),
            Selection::Empty => Err(OrientationError::MissingSelection { field }),
            Selection::Conflict => Err(OrientationError::ConflictingSelection { field }),
        }
    }
}

/// A validated calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrientationRequest {
    pub notch: NotchDirection,
    pub lamellae: LamellaeLocation,
    pub milling_angle: MillingAngle,
    pub shuttle: ShuttleType,
}

impl OrientationRequest {
    pub fn new(
        notch: NotchDirection,
        lamellae: LamellaeLocation,
        milling_angle: MillingAngle,
        shuttle: ShuttleType,
    ) -> Self {
        Self {
            notch,
            lamellae,
            milling_angle,
            shuttle,
        }
    }

    pub fn builder() -> OrientationRequestBuilder {
        OrientationRequestBuilder::default()
    }

    /// Run the calculator on this request
    pub fn compute(&self) -> OrientationResult {
        calculator::compute(self.notch, self.lamellae, self.milling_angle, self.shuttle)
    }
}

/// Collects form selections and validates them into an [`OrientationRequest`].
#[derive(Debug, Clone, Default)]
pub struct OrientationRequestBuilder {
    notch: Selection<NotchDirection>,
    lamellae: Selection<LamellaeLocation>,
    shuttle: Selection<ShuttleType>,
    milling_angle: Option<i64>,
}

impl OrientationRequestBuilder {
    pub fn notch(mut self, notch: NotchDirection) -> Self {
        self.notch = self.notch.select(notch);
        self
    }

    pub fn lamellae(mut self, location: LamellaeLocation) -> Self {
        self.lamellae = self.lamellae.select(location);
        self
    }

    pub fn shuttle(mut self, shuttle: ShuttleType) -> Self {
        self.shuttle = self.shuttle.select(shuttle);
        self
    }

    /// Set the milling angle. Later calls replace earlier ones, like a number input.
    pub fn milling_angle(mut self, degrees: i64) -> Self {
        self.milling_angle = Some(degrees);
        self
    }

    /// Set the shuttle type only if none was selected yet
    pub fn shuttle_or(self, fallback: Option<ShuttleType>) -> Self {
        match (self.shuttle, fallback) {
            (Selection::Empty, Some(shuttle)) => self.shuttle(shuttle),
            _ => self,
        }
    }

    /// Validate the selections.
    ///
    /// Checked in form order: notch, lamellae, shuttle, then the angle, which
    /// defaults to 10° when never set.
    pub fn build(self) -> Result<OrientationRequest> {
        let notch = self.notch.resolve(NOTCH_FIELD)?;
        let lamellae = self.lamellae.resolve(LAMELLAE_FIELD)?;
        let shuttle = self.shuttle.resolve(SHUTTLE_FIELD)?;
        let milling_angle = match self.milling_angle {
            Some(degrees) => MillingAngle::new(degrees)?,
            None => MillingAngle::DEFAULT,
        };
        Ok(OrientationRequest::new(notch, lamellae, milling_angle, shuttle))
    }
}

/// A request as free text, e.g. one line of a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRequest {
    #[serde(alias = "notch_direction")]
    pub notch: String,
    #[serde(alias = "lamellae_location", alias = "location")]
    pub lamellae: String,
    pub milling_angle: i64,
    #[serde(alias = "shuttle_type")]
    pub shuttle: String,
}

impl LabelRequest {
    /// Parse every label; the first invalid field decides the error kind
    pub fn parse(&self) -> Result<OrientationRequest> {
        Ok(OrientationRequest::new(
            NotchDirection::parse(&self.notch)?,
            LamellaeLocation::parse(&self.lamellae)?,
            MillingAngle::new(self.milling_angle)?,
            ShuttleType::parse(&self.shuttle)?,
        ))
    }
}
