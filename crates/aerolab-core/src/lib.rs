//! AeroLab Core - Flight Session Engine
//!
//! Drives the force model from `aerolab-logic` in fixed time steps, applies
//! wind and random gusts, keeps the tutorial in step with the controls, and
//! saves sessions to disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use aerolab_core::prelude::*;
//!
//! let mut engine = FlightEngine::new(EngineConfig::default()).unwrap();
//! engine.start();
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod config;
pub mod engine;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{EngineError, FlightEngine};
    pub use aerolab_logic::physics::{FlightParameters, FlightState, Forces, ParameterKind};
}
