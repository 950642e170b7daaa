//! Descriptive aircraft record.
//!
//! ```
//! use aerolab_logic::plane::Plane;
//!
//! let mut plane = Plane::new(
//!     "Boeing747",
//!     70.6,
//!     vec!["wing".into(), "fuselage".into()],
//!     vec!["aluminum".into()],
//!     180_000.0,
//! );
//! assert_eq!(plane.model, "Boeing747");
//! plane.weight = 190_000.0;
//! assert_eq!(plane.weight, 190_000.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A kind of aircraft: its model, size, what it is built from, and its mass.
///
/// Construction never fails. Use [`validate_plane`] to check a record
/// before feeding it to the force model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Model name, e.g. "Boeing 737-800".
    pub model: String,
    /// Characteristic size (wingspan, metres).
    pub size: f64,
    /// Major components.
    pub parts: Vec<String>,
    /// Structural materials.
    pub materials: Vec<String>,
    /// Mass in kilograms.
    pub weight: f64,
}

impl Plane {
    pub fn new(
        model: impl Into<String>,
        size: f64,
        parts: Vec<String>,
        materials: Vec<String>,
        weight: f64,
    ) -> Self {
        Self {
            model: model.into(),
            size,
            parts,
            materials,
            weight,
        }
    }
}

/// Plane validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaneError {
    #[error("plane model is empty")]
    EmptyModel,
    #[error("plane size must be positive, got {0}")]
    NonPositiveSize(f64),
    #[error("plane weight must be positive, got {0}")]
    NonPositiveWeight(f64),
    #[error("plane field `{0}` is not a finite number")]
    NotFinite(&'static str),
}

/// Validate a plane record, returning all errors found.
pub fn validate_plane(plane: &Plane) -> Vec<PlaneError> {
    let mut errors = Vec::new();

    if plane.model.trim().is_empty() {
        errors.push(PlaneError::EmptyModel);
    }

    if !plane.size.is_finite() {
        errors.push(PlaneError::NotFinite("size"));
    } else if plane.size <= 0.0 {
        errors.push(PlaneError::NonPositiveSize(plane.size));
    }

    if !plane.weight.is_finite() {
        errors.push(PlaneError::NotFinite("weight"));
    } else if plane.weight <= 0.0 {
        errors.push(PlaneError::NonPositiveWeight(plane.weight));
    }

    errors
}
