//! Flight state snapshot.
//!
//! [`Simulation`] is the record a lesson reads from: the plane being flown
//! and the atmospheric and kinematic values around it. The engine keeps it
//! in sync with the force model after every step.

use serde::{Deserialize, Serialize};

use crate::physics;
use crate::plane::Plane;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Static pressure around the aircraft (Pa).
    pub pressure: f64,
    pub plane: Plane,
    /// Headwind component of the surrounding air (km/h). Negative is a tailwind.
    pub air_velocity: f64,
    /// Altitude (m).
    pub height: f64,
    /// Ground speed (km/h).
    pub velocity: f64,
}

impl Simulation {
    pub fn new(pressure: f64, plane: Plane, air_velocity: f64, height: f64, velocity: f64) -> Self {
        Self {
            pressure,
            plane,
            air_velocity,
            height,
            velocity,
        }
    }

    /// Speed of the air over the wing (km/h).
    pub fn relative_airspeed(&self) -> f64 {
        self.velocity + self.air_velocity
    }

    /// Recompute `pressure` from `height`.
    pub fn refresh_pressure(&mut self) {
        self.pressure = physics::pressure_at(self.height);
    }
}
