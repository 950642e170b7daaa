//! Physical constants for the force model.
//!
//! All values are SI unless the name says otherwise.

/// Air density at sea level (kg/m³).
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Pressure at sea level (Pa).
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Exponential scale height of the atmosphere (m).
pub const SCALE_HEIGHT_M: f64 = 8_400.0;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Thrust produced at 100% throttle (N).
pub const MAX_THRUST_N: f64 = 120_000.0;

/// Angle of attack above which the wing stalls (degrees).
pub const CRITICAL_ANGLE_DEG: f64 = 15.0;

/// Fraction of lift that survives a stall.
pub const STALL_LIFT_FACTOR: f64 = 0.3;

/// Conversion factor from km/h to m/s.
pub const KMH_PER_MS: f64 = 3.6;

/// Absolute zero (°C).
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Force-balance thresholds for "steady flight" (N).
pub mod balance {
    /// Maximum |thrust − drag| for a balanced state.
    pub const THRUST_DRAG_TOLERANCE: f64 = 5_000.0;
    /// Maximum |lift − weight| for a balanced state.
    pub const LIFT_WEIGHT_TOLERANCE: f64 = 10_000.0;
}

/// Bounds of the 2D flight view the stepper keeps the aircraft inside.
pub mod viewport {
    pub const MIN_X: f64 = 50.0;
    pub const MAX_X: f64 = 750.0;
    pub const MIN_Y: f64 = 50.0;
    pub const MAX_Y: f64 = 550.0;
    /// Starting position (center of the view).
    pub const START_X: f64 = 400.0;
    pub const START_Y: f64 = 300.0;
    /// View units per metre of displacement.
    pub const POSITION_SCALE: f64 = 100.0;
}
