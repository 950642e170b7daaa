//! Save/Load functionality for flight sessions
//!
//! Uses bincode for compact binary serialization of a session snapshot.
//! The tutorial and gust generator are not saved; they restart on load.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

use aerolab_logic::physics::{FlightParameters, FlightState};
use aerolab_logic::simulation::Simulation;
use aerolab_logic::weather::Weather;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Simulated seconds since the last reset
    pub sim_time: f64,
    pub simulation: Simulation,
    pub weather: Weather,
    pub parameters: FlightParameters,
    pub flight_state: FlightState,
    /// Catalog id of the selected aircraft
    pub aircraft_id: String,
    pub running: bool,
}

/// On-disk layout: a version tag followed by the snapshot
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    session: SessionSnapshot,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Write a session to a writer
pub fn save_session<W: Write>(writer: W, session: &SessionSnapshot) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        session: session.clone(),
    };
    log::debug!("Writing {} byte session", bincode::serialized_size(&save_data)?);
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Read a session from a reader
pub fn load_session<R: Read>(reader: R) -> Result<SessionSnapshot, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        log::warn!(
            "Rejecting save file with version {} (expected {})",
            save_data.version,
            SAVE_VERSION
        );
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(save_data.session)
}

pub fn save_to_path(path: &Path, session: &SessionSnapshot) -> Result<(), SaveError> {
    let mut writer = BufWriter::new(File::create(path)?);
    save_session(&mut writer, session)?;
    writer.flush()?;
    log::info!("Saved session to {}", path.display());
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<SessionSnapshot, SaveError> {
    let reader = BufReader::new(File::open(path)?);
    let session = load_session(reader)?;
    log::info!("Loaded session from {}", path.display());
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerolab_logic::plane::Plane;

    fn snapshot() -> SessionSnapshot {
        let plane = Plane::new("Cessna 172", 11.0, vec!["wing".into()], Vec::new(), 767.0);
        SessionSnapshot {
            sim_time: 12.5,
            simulation: Simulation::new(90_000.0, plane, 5.0, 1_000.0, 180.0),
            weather: Weather::default(),
            parameters: FlightParameters::default(),
            flight_state: FlightState {
                x: 420.0,
                y: 280.0,
                vx: 1.5,
                vy: -0.25,
                rotation: 0.1,
            },
            aircraft_id: "cessna-172".into(),
            running: true,
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let original = snapshot();
        let mut buffer = Vec::new();
        save_session(&mut buffer, &original).expect("Save failed");

        println!("Save size: {} bytes", buffer.len());

        let loaded = load_session(&buffer[..]).expect("Load failed");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_version_mismatch() {
        let data = SaveData {
            version: SAVE_VERSION + 1,
            session: snapshot(),
        };
        let buffer = bincode::serialize(&data).unwrap();
        match load_session(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_file() {
        let mut buffer = Vec::new();
        save_session(&mut buffer, &snapshot()).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(matches!(
            load_session(&buffer[..]),
            Err(SaveError::Bincode(_))
        ));
    }

    #[test]
    fn test_path_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "aerolab-persistence-{}.bin",
            std::process::id()
        ));
        save_to_path(&path, &snapshot()).unwrap();
        let loaded = load_from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.aircraft_id, "cessna-172");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here/aerolab.bin");
        assert!(matches!(load_from_path(path), Err(SaveError::Io(_))));
    }
}
