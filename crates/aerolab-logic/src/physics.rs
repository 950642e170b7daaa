//! Four-force flight model: lift, drag, thrust, weight.
//!
//! The model is closed-form so a learner can check every
//! number by hand:
//!
//! - air density falls off exponentially with altitude,
//! - lift and drag scale with dynamic pressure `q = ½ρv²`,
//! - thrust is linear in throttle,
//! - past the critical angle of attack the wing stalls and keeps only 30%
//!   of its lift.
//!
//! [`step`] then integrates the net forces into a 2D position inside the
//! flight view with an explicit Euler update.
//!
//! ```
//! use aerolab_logic::physics::{compute_forces, is_stalling, FlightParameters};
//!
//! let mut params = FlightParameters::default();
//! let cruise = compute_forces(&params);
//! params.angle_of_attack_deg = 18.0;
//! assert!(is_stalling(&params));
//! assert!(compute_forces(&params).lift < cruise.lift);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{self, balance, viewport};

/// Adjustable inputs to the force model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightParameters {
    /// Speed of the aircraft before any wind is applied (km/h).
    pub airspeed_kmh: f64,
    /// Angle between the wing chord and the relative wind (degrees).
    pub angle_of_attack_deg: f64,
    /// Altitude above sea level (m).
    pub altitude_m: f64,
    /// Engine setting, 0–100.
    pub throttle_pct: f64,
    /// Aircraft mass (kg).
    pub weight_kg: f64,
    /// Wing planform area (m²).
    pub wing_area_m2: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            airspeed_kmh: 250.0,
            angle_of_attack_deg: 5.0,
            altitude_m: 3000.0,
            throttle_pct: 75.0,
            weight_kg: 41_400.0,
            wing_area_m2: 125.0,
            lift_coefficient: 1.2,
            drag_coefficient: 0.025,
        }
    }
}

/// Names a single field of [`FlightParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Airspeed,
    AngleOfAttack,
    Altitude,
    Throttle,
    Weight,
    WingArea,
    LiftCoefficient,
    DragCoefficient,
}

impl ParameterKind {
    /// All parameter kinds for iteration.
    pub const ALL: [ParameterKind; 8] = [
        ParameterKind::Airspeed,
        ParameterKind::AngleOfAttack,
        ParameterKind::Altitude,
        ParameterKind::Throttle,
        ParameterKind::Weight,
        ParameterKind::WingArea,
        ParameterKind::LiftCoefficient,
        ParameterKind::DragCoefficient,
    ];

    /// Inclusive range a pilot control may be set to, if the parameter is
    /// directly controllable.
    pub fn control_range(self) -> Option<(f64, f64)> {
        match self {
            Self::Airspeed => Some((50.0, 500.0)),
            Self::AngleOfAttack => Some((-10.0, 25.0)),
            Self::Altitude => Some((0.0, 12_000.0)),
            Self::Throttle => Some((0.0, 100.0)),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Airspeed => "airspeed",
            Self::AngleOfAttack => "angle of attack",
            Self::Altitude => "altitude",
            Self::Throttle => "throttle",
            Self::Weight => "weight",
            Self::WingArea => "wing area",
            Self::LiftCoefficient => "lift coefficient",
            Self::DragCoefficient => "drag coefficient",
        }
    }
}

impl FlightParameters {
    pub fn get(&self, kind: ParameterKind) -> f64 {
        match kind {
            ParameterKind::Airspeed => self.airspeed_kmh,
            ParameterKind::AngleOfAttack => self.angle_of_attack_deg,
            ParameterKind::Altitude => self.altitude_m,
            ParameterKind::Throttle => self.throttle_pct,
            ParameterKind::Weight => self.weight_kg,
            ParameterKind::WingArea => self.wing_area_m2,
            ParameterKind::LiftCoefficient => self.lift_coefficient,
            ParameterKind::DragCoefficient => self.drag_coefficient,
        }
    }

    pub fn set(&mut self, kind: ParameterKind, value: f64) {
        let slot = match kind {
            ParameterKind::Airspeed => &mut self.airspeed_kmh,
            ParameterKind::AngleOfAttack => &mut self.angle_of_attack_deg,
            ParameterKind::Altitude => &mut self.altitude_m,
            ParameterKind::Throttle => &mut self.throttle_pct,
            ParameterKind::Weight => &mut self.weight_kg,
            ParameterKind::WingArea => &mut self.wing_area_m2,
            ParameterKind::LiftCoefficient => &mut self.lift_coefficient,
            ParameterKind::DragCoefficient => &mut self.drag_coefficient,
        };
        *slot = value;
    }

    /// Airspeed in m/s.
    pub fn airspeed_ms(&self) -> f64 {
        self.airspeed_kmh / constants::KMH_PER_MS
    }
}

/// The four forces acting on the aircraft (N).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Forces {
    pub lift: f64,
    pub drag: f64,
    pub thrust: f64,
    pub weight: f64,
}

impl Forces {
    /// Thrust minus drag; positive accelerates forward.
    pub fn net_horizontal(&self) -> f64 {
        self.thrust - self.drag
    }

    /// Lift minus weight; positive climbs.
    pub fn net_vertical(&self) -> f64 {
        self.lift - self.weight
    }
}

/// Air density at `altitude_m` (kg/m³).
pub fn air_density(altitude_m: f64) -> f64 {
    constants::SEA_LEVEL_DENSITY * (-altitude_m / constants::SCALE_HEIGHT_M).exp()
}

/// Static pressure at `altitude_m` (Pa), using the same scale height as density.
pub fn pressure_at(altitude_m: f64) -> f64 {
    constants::SEA_LEVEL_PRESSURE * (-altitude_m / constants::SCALE_HEIGHT_M).exp()
}

/// Dynamic pressure `½ρv²` for the given parameters (Pa).
pub fn dynamic_pressure(params: &FlightParameters) -> f64 {
    let v = params.airspeed_ms();
    0.5 * air_density(params.altitude_m) * v * v
}

pub fn is_stalling(params: &FlightParameters) -> bool {
    params.angle_of_attack_deg > constants::CRITICAL_ANGLE_DEG
}

/// Evaluate all four forces for a parameter set.
pub fn compute_forces(params: &FlightParameters) -> Forces {
    let q = dynamic_pressure(params);

    let mut lift = q * params.wing_area_m2 * params.lift_coefficient;
    if is_stalling(params) {
        lift *= constants::STALL_LIFT_FACTOR;
    }

    Forces {
        lift,
        drag: q * params.wing_area_m2 * params.drag_coefficient,
        thrust: params.throttle_pct / 100.0 * constants::MAX_THRUST_N,
        weight: params.weight_kg * constants::GRAVITY,
    }
}

/// How far the current forces are from steady, unaccelerated flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceBalance {
    pub thrust_minus_drag: f64,
    pub lift_minus_weight: f64,
    /// Both differences are inside the steady-flight tolerances.
    pub balanced: bool,
}

impl ForceBalance {
    pub fn analyze(forces: &Forces) -> Self {
        let thrust_minus_drag = forces.net_horizontal();
        let lift_minus_weight = forces.net_vertical();
        Self {
            thrust_minus_drag,
            lift_minus_weight,
            balanced: thrust_minus_drag.abs() < balance::THRUST_DRAG_TOLERANCE
                && lift_minus_weight.abs() < balance::LIFT_WEIGHT_TOLERANCE,
        }
    }
}

/// Position and velocity of the aircraft inside the flight view.
///
/// View coordinates grow rightward and *downward*, so a climbing aircraft
/// has negative `vy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pitch drawn for the aircraft (radians).
    pub rotation: f64,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            x: viewport::START_X,
            y: viewport::START_Y,
            vx: 0.0,
            vy: 0.0,
            rotation: 0.0,
        }
    }
}

/// Advance `state` by `dt` seconds under `forces`.
///
/// A non-positive mass produces no acceleration; the aircraft coasts.
pub fn step(state: &mut FlightState, params: &FlightParameters, forces: &Forces, dt: f64) {
    let mass = params.weight_kg;
    let (ax, ay) = if mass > 0.0 {
        (forces.net_horizontal() / mass, -forces.net_vertical() / mass)
    } else {
        (0.0, 0.0)
    };

    state.vx += ax * dt;
    state.vy += ay * dt;

    state.x = (state.x + state.vx * dt * viewport::POSITION_SCALE)
        .clamp(viewport::MIN_X, viewport::MAX_X);
    state.y = (state.y + state.vy * dt * viewport::POSITION_SCALE)
        .clamp(viewport::MIN_Y, viewport::MAX_Y);

    state.rotation = params.angle_of_attack_deg.to_radians();
}

/// Parameter validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{} = {value} outside {min}..={max}", .kind.label())]
    OutOfRange {
        kind: ParameterKind,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{} must be positive, got {1}", .0.label())]
    NonPositive(ParameterKind, f64),
    #[error("{} must not be negative, got {1}", .0.label())]
    Negative(ParameterKind, f64),
    #[error("{} is not a finite number", .0.label())]
    NotFinite(ParameterKind),
}

/// Validate a parameter set, returning all errors found.
pub fn validate_parameters(params: &FlightParameters) -> Vec<ParameterError> {
    let mut errors = Vec::new();

    for kind in ParameterKind::ALL {
        let value = params.get(kind);
        if !value.is_finite() {
            errors.push(ParameterError::NotFinite(kind));
            continue;
        }
        if let Some((min, max)) = kind.control_range() {
            if !(min..=max).contains(&value) {
                errors.push(ParameterError::OutOfRange {
                    kind,
                    value,
                    min,
                    max,
                });
            }
        }
        match kind {
            ParameterKind::Weight | ParameterKind::WingArea if value <= 0.0 => {
                errors.push(ParameterError::NonPositive(kind, value));
            }
            ParameterKind::LiftCoefficient | ParameterKind::DragCoefficient if value < 0.0 => {
                errors.push(ParameterError::Negative(kind, value));
            }
            _ => {}
        }
    }

    errors
}
