//! Integration tests for a complete flight session.
//!
//! Exercises: EngineConfig → FlightEngine → controls → update loop
//! → tutorial → save file on disk → restored engine.

use aerolab_core::config::EngineConfig;
use aerolab_core::engine::{EngineError, FlightEngine};
use aerolab_core::persistence::{self, SaveError};
use aerolab_logic::physics::{FlightState, ParameterKind};
use aerolab_logic::tutorial::Severity;
use aerolab_logic::weather::Weather;

// ── Helpers ────────────────────────────────────────────────────────────

fn run_for(engine: &mut FlightEngine, seconds: f64) -> u32 {
    let frames = (seconds * 60.0).round() as u32;
    (0..frames).map(|_| engine.update(1.0 / 60.0)).sum()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("aerolab-{}-{}.bin", name, std::process::id()))
}

// ── Session flow ───────────────────────────────────────────────────────

#[test]
fn config_from_json_drives_engine() {
    let config: EngineConfig =
        serde_json::from_str(r#"{ "aircraft_id": "cessna-172", "time_scale": 4.0 }"#).unwrap();
    let mut engine = FlightEngine::new(config).unwrap();
    assert_eq!(engine.simulation.plane.model, "Cessna 172");

    engine.start();
    run_for(&mut engine, 1.0);
    assert!((engine.sim_time() - 4.0).abs() < 1e-6);
}

#[test]
fn lesson_session_end_to_end() {
    let mut engine = FlightEngine::new(EngineConfig::default()).unwrap();
    // The cruise preset already flies fast enough for the first step
    assert_eq!(engine.start_tutorial(), vec![1]);
    engine.start();

    assert!(engine.set_parameter(ParameterKind::Airspeed, 280.0).unwrap().is_empty());
    run_for(&mut engine, 2.0);
    assert_eq!(engine.set_parameter(ParameterKind::AngleOfAttack, 10.0).unwrap(), vec![2]);
    assert_eq!(engine.set_parameter(ParameterKind::AngleOfAttack, 16.5).unwrap(), vec![3]);
    assert!(engine.is_stalling());
    assert!(matches!(engine.feedback().message, Some((Severity::Danger, _))));

    assert!(engine.set_parameter(ParameterKind::AngleOfAttack, 5.0).unwrap().is_empty());
    assert!(!engine.is_stalling());
    assert_eq!(engine.set_parameter(ParameterKind::Altitude, 9_000.0).unwrap(), vec![4]);
    assert_eq!(engine.tutorial().completed(), &[1, 2, 3, 4]);

    assert!(engine.next_tutorial_step().is_empty());
    assert!(engine.tutorial().is_finished());
}

#[test]
fn rejected_control_leaves_state_alone() {
    let mut engine = FlightEngine::new(EngineConfig::default()).unwrap();
    let before = *engine.parameters();
    let err = engine.set_parameter(ParameterKind::Altitude, 20_000.0);
    assert!(matches!(err, Err(EngineError::InvalidParameter(_))));
    assert_eq!(*engine.parameters(), before);
}

#[test]
fn gusty_session_stays_in_view() {
    let config = EngineConfig {
        gust_strength_kmh: 60.0,
        seed: 1234,
        ..EngineConfig::default()
    };
    let mut engine = FlightEngine::new(config).unwrap();
    engine.set_wind(25.0);
    engine.start();
    let steps = run_for(&mut engine, 20.0);
    assert_eq!(steps, 200);

    let state = engine.flight_state();
    assert!(state.x.is_finite() && state.y.is_finite());
    assert!((50.0..=750.0).contains(&state.x));
    assert!((50.0..=550.0).contains(&state.y));
}

#[test]
fn pause_freezes_then_reset_restarts() {
    let mut engine = FlightEngine::new(EngineConfig::default()).unwrap();
    engine.start();
    run_for(&mut engine, 1.0);
    engine.pause();
    let frozen = *engine.flight_state();
    run_for(&mut engine, 1.0);
    assert_eq!(*engine.flight_state(), frozen);

    engine.reset();
    assert_eq!(*engine.flight_state(), FlightState::default());
    assert_eq!(engine.sim_time(), 0.0);
}

// ── Save files ─────────────────────────────────────────────────────────

#[test]
fn session_survives_save_file() {
    let path = temp_path("session");
    let mut engine = FlightEngine::new(EngineConfig::default()).unwrap();
    engine.select_aircraft("airbus-a350-900").unwrap();
    engine.set_weather(Weather::new(2.35, 48.86, "France", "Paris", "09:30", 11.0, "rain"));
    engine.set_parameter(ParameterKind::Throttle, 40.0).unwrap();
    engine.start();
    run_for(&mut engine, 3.0);

    persistence::save_to_path(&path, &engine.snapshot()).unwrap();
    let session = persistence::load_from_path(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let mut restored = FlightEngine::new(EngineConfig::default()).unwrap();
    restored.restore(session).unwrap();
    assert_eq!(restored.aircraft().unwrap().id, "airbus-a350-900");
    assert_eq!(restored.weather().city, "Paris");
    assert_eq!(restored.parameters().throttle_pct, 40.0);
    assert_eq!(restored.flight_state(), engine.flight_state());

    // Both continue identically from here
    run_for(&mut engine, 1.0);
    run_for(&mut restored, 1.0);
    assert_eq!(restored.flight_state(), engine.flight_state());
}

#[test]
fn unknown_aircraft_in_save_is_rejected() {
    let engine = FlightEngine::new(EngineConfig::default()).unwrap();
    let mut snapshot = engine.snapshot();
    snapshot.aircraft_id = "concorde".into();

    let mut buffer = Vec::new();
    persistence::save_session(&mut buffer, &snapshot).unwrap();

    let mut target = FlightEngine::new(EngineConfig::default()).unwrap();
    assert!(matches!(
        target.load(&buffer[..]),
        Err(EngineError::UnknownAircraft(id)) if id == "concorde"
    ));
}

#[test]
fn save_with_invalid_parameters_is_rejected() {
    let source = FlightEngine::new(EngineConfig::default()).unwrap();
    let mut snapshot = source.snapshot();
    snapshot.parameters.throttle_pct = 500.0;
    snapshot.parameters.weight_kg = f64::NAN;
    snapshot.sim_time = 99.0;

    let mut buffer = Vec::new();
    persistence::save_session(&mut buffer, &snapshot).unwrap();

    let mut target = FlightEngine::new(EngineConfig::default()).unwrap();
    target.select_aircraft("cessna-172").unwrap();
    let before = *target.parameters();
    assert!(matches!(
        target.load(&buffer[..]),
        Err(EngineError::InvalidParameter(_))
    ));

    // Nothing from the rejected save leaked in
    assert_eq!(*target.parameters(), before);
    assert_eq!(target.sim_time(), 0.0);
    assert_eq!(target.aircraft().unwrap().id, "cessna-172");
    assert!(target.forces().thrust <= 120_000.0);
}

#[test]
fn corrupt_save_is_an_error() {
    let mut engine = FlightEngine::new(EngineConfig::default()).unwrap();
    let garbage = [0xffu8; 7];
    assert!(matches!(
        engine.load(&garbage[..]),
        Err(EngineError::Save(SaveError::Bincode(_)))
    ));
}
