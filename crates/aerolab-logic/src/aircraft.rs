//! Aircraft database and flight presets.
//!
//! The bundled catalog lists the airliners in the reference database plus
//! the light trainer used as a simulator preset. Selecting an aircraft
//! copies its mass and wing area into the force-model parameters.
//!
//! ```
//! use aerolab_logic::aircraft::{AircraftCatalog, AircraftFilter, Manufacturer};
//!
//! let catalog = AircraftCatalog::builtin().unwrap();
//! let filter = AircraftFilter {
//!     manufacturer: Some(Manufacturer::Airbus),
//!     ..AircraftFilter::default()
//! };
//! assert_eq!(catalog.filter(&filter).len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::FlightParameters;
use crate::plane::Plane;

pub const BUILTIN_AIRCRAFT: &str = include_str!("../../../data/aircraft.json");

/// Airframe alloys listed on every generated [`Plane`].
const DEFAULT_MATERIALS: [&str; 3] = ["aluminum alloy", "titanium", "carbon-fiber composite"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    Boeing,
    Airbus,
    Cessna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    NarrowBody,
    WideBody,
    Jumbo,
    LightSingle,
}

impl Manufacturer {
    pub fn name(self) -> &'static str {
        match self {
            Self::Boeing => "Boeing",
            Self::Airbus => "Airbus",
            Self::Cessna => "Cessna",
        }
    }
}

impl BodyType {
    pub fn label(self) -> &'static str {
        match self {
            Self::NarrowBody => "Narrow-body",
            Self::WideBody => "Wide-body",
            Self::Jumbo => "Jumbo",
            Self::LightSingle => "Light single",
        }
    }
}

/// Published specifications for one aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSpec {
    pub id: String,
    pub name: String,
    pub manufacturer: Manufacturer,
    pub body: BodyType,
    pub wingspan_m: f64,
    pub length_m: f64,
    pub empty_weight_kg: f64,
    pub max_weight_kg: f64,
    pub seating: u32,
    pub crew: u32,
    pub fuel_capacity_l: f64,
    pub engines: u32,
    pub engine_type: String,
    pub max_altitude_m: f64,
    pub max_speed_kmh: f64,
    pub range_km: f64,
    pub wing_area_m2: f64,
    /// Mass loaded by the simulator preset, when it differs from empty weight.
    #[serde(default)]
    pub sim_weight_kg: Option<f64>,
}

impl AircraftSpec {
    /// Describe this aircraft as a [`Plane`] record.
    pub fn to_plane(&self) -> Plane {
        let mut parts = vec![
            "fuselage".to_string(),
            "wing".to_string(),
            "empennage".to_string(),
            "landing gear".to_string(),
        ];
        parts.extend((1..=self.engines).map(|n| format!("engine {n} ({})", self.engine_type)));

        Plane::new(
            self.name.clone(),
            self.wingspan_m,
            parts,
            DEFAULT_MATERIALS.iter().map(|m| m.to_string()).collect(),
            self.empty_weight_kg,
        )
    }

    /// Mass flown by the simulator: the preset mass, else empty weight.
    pub fn flight_weight_kg(&self) -> f64 {
        self.sim_weight_kg.unwrap_or(self.empty_weight_kg)
    }

    /// Load this aircraft's mass and wing area into the force model.
    pub fn apply_to(&self, params: &mut FlightParameters) {
        params.weight_kg = self.flight_weight_kg();
        params.wing_area_m2 = self.wing_area_m2;
    }

    /// Wing loading at empty weight (kg/m²).
    pub fn wing_loading(&self) -> f64 {
        if self.wing_area_m2 <= 0.0 {
            0.0
        } else {
            self.empty_weight_kg / self.wing_area_m2
        }
    }
}

/// Search criteria for the aircraft list. Empty fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AircraftFilter {
    /// Case-insensitive substring of the name or manufacturer.
    pub search: String,
    pub manufacturer: Option<Manufacturer>,
    pub body: Option<BodyType>,
}

impl AircraftFilter {
    pub fn matches(&self, spec: &AircraftSpec) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || spec.name.to_lowercase().contains(&needle)
            || spec.manufacturer.name().to_lowercase().contains(&needle);
        let matches_manufacturer = self.manufacturer.map_or(true, |m| m == spec.manufacturer);
        let matches_body = self.body.map_or(true, |b| b == spec.body);

        matches_search && matches_manufacturer && matches_body
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse aircraft catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate aircraft id `{0}`")]
    DuplicateId(String),
    #[error("aircraft catalog is empty")]
    Empty,
}

/// The set of aircraft a session can pick from, in catalog order.
#[derive(Debug, Clone)]
pub struct AircraftCatalog {
    aircraft: Vec<AircraftSpec>,
}

impl AircraftCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_AIRCRAFT)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let aircraft: Vec<AircraftSpec> = serde_json::from_str(json)?;
        if aircraft.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &aircraft {
            if !seen.insert(spec.id.as_str()) {
                return Err(CatalogError::DuplicateId(spec.id.clone()));
            }
        }
        Ok(Self { aircraft })
    }

    pub fn get(&self, id: &str) -> Option<&AircraftSpec> {
        self.aircraft.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AircraftSpec> {
        self.aircraft.iter()
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn filter(&self, filter: &AircraftFilter) -> Vec<&AircraftSpec> {
        self.aircraft.iter().filter(|a| filter.matches(a)).collect()
    }
}
