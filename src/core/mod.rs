//! Core module for fib2tem
//!
//! # Architecture
//!
//! - `models`: Input and output types (NotchDirection, LamellaeLocation, ...)
//! - `calculator`: The pure orientation calculation
//! - `request`: Per-attempt request objects and selection validation
//! - `config`: User configuration file
//! - `error`: Error types using thiserror

pub mod models;
pub mod error;
pub mod calculator;
pub mod request;
pub mod config;

// Re-export commonly used types
pub use models::{
    LamellaeLocation, MillingAngle, NotchDirection, OrientationResult, OutputFormat, ShuttleType,
    NOTCH_POSITIONS,
};
pub use error::{OrientationError, Result, ResultExt};
pub use calculator::{
    cassette_index, compute, compute_checked, compute_from_labels, krios_index, krios_tilt,
};
pub use request::{LabelRequest, OrientationRequest, OrientationRequestBuilder};
pub use config::Config;
