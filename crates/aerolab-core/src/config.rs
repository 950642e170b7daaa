//! Engine configuration.
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! wants to change:
//!
//! ```
//! use aerolab_core::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "time_scale": 2.0 }"#).unwrap();
//! assert_eq!(config.time_scale, 2.0);
//! assert_eq!(config.aircraft_id, "boeing-737-800");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed physics step (seconds).
    pub time_step_s: f64,
    /// Simulated seconds per real second.
    pub time_scale: f64,
    /// Upper bound on physics steps run by a single `update` call.
    pub max_substeps: u32,
    /// Peak random gust added to the relative wind each step (km/h). Zero disables gusts.
    pub gust_strength_kmh: f64,
    /// Seed for the gust generator.
    pub seed: u64,
    /// Aircraft selected when the engine starts.
    pub aircraft_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_step_s: 0.1,
            time_scale: 1.0,
            max_substeps: 100,
            gust_strength_kmh: 0.0,
            seed: 42,
            aircraft_id: "boeing-737-800".to_string(),
        }
    }
}

/// Check a configuration, returning a description of each problem found.
pub fn validate_engine_config(config: &EngineConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if !(config.time_step_s.is_finite() && config.time_step_s > 0.0) {
        problems.push(format!("time_step_s must be positive, got {}", config.time_step_s));
    }
    if !(config.time_scale.is_finite() && config.time_scale >= 0.0) {
        problems.push(format!("time_scale must not be negative, got {}", config.time_scale));
    }
    if config.max_substeps == 0 {
        problems.push("max_substeps must be at least 1".to_string());
    }
    if !(config.gust_strength_kmh.is_finite() && config.gust_strength_kmh >= 0.0) {
        problems.push(format!(
            "gust_strength_kmh must not be negative, got {}",
            config.gust_strength_kmh
        ));
    }
    if config.aircraft_id.trim().is_empty() {
        problems.push("aircraft_id is empty".to_string());
    }

    problems
}
