//! AeroLab Headless Simulation Harness
//!
//! Validates the force model, aircraft data, records and the flight engine
//! without any front end.
//!
//! Usage:
//!   cargo run -p aerolab-simtest
//!   cargo run -p aerolab-simtest -- --verbose
//!   cargo run -p aerolab-simtest -- --config engine.json

use aerolab_core::config::{validate_engine_config, EngineConfig};
use aerolab_core::engine::FlightEngine;
use aerolab_core::persistence;
use aerolab_logic::aircraft::{AircraftCatalog, AircraftFilter, Manufacturer};
use aerolab_logic::auth::Auth;
use aerolab_logic::chat::{ChatConfig, Chatting, GroupChat};
use aerolab_logic::constants::viewport;
use aerolab_logic::group::Group;
use aerolab_logic::physics::{self, FlightParameters, ForceBalance, ParameterKind};
use aerolab_logic::plane::validate_plane;
use aerolab_logic::tutorial::{self, Severity, TutorialProgress};
use aerolab_logic::weather::{validate_weather, Weather};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== AeroLab Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Aircraft catalog
    results.extend(validate_catalog(verbose));

    // 2. Force model sweep
    results.extend(validate_force_model(verbose));

    // 3. Tutorial walkthrough
    results.extend(validate_tutorial(verbose));

    // 4. Chat & leaderboard records
    results.extend(validate_records(verbose));

    // 5. Engine run per aircraft
    results.extend(validate_engine_runs(&config, verbose));

    // 6. Save/load
    results.extend(validate_persistence(&config));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(args: &[String]) -> Result<EngineConfig, String> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(EngineConfig::default());
    };
    let path = args
        .get(pos + 1)
        .ok_or_else(|| "--config needs a path".to_string())?;
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let config: EngineConfig =
        serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))?;

    let problems = validate_engine_config(&config);
    if !problems.is_empty() {
        return Err(problems.join("; "));
    }
    log::info!("Loaded engine config from {}", path);
    Ok(config)
}

// ── 1. Aircraft Catalog ─────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Aircraft Catalog ---");
    let mut results = Vec::new();

    let catalog = match AircraftCatalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "catalog_parse".into(),
                passed: false,
                detail: format!("{}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "catalog_not_empty".into(),
        passed: catalog.len() >= 7,
        detail: format!("{} aircraft loaded", catalog.len()),
    });

    // Every preset produces a plane the validator accepts
    let bad_planes: Vec<_> = catalog
        .iter()
        .filter(|a| !validate_plane(&a.to_plane()).is_empty())
        .map(|a| a.id.as_str())
        .collect();
    results.push(TestResult {
        name: "catalog_valid_planes".into(),
        passed: bad_planes.is_empty(),
        detail: if bad_planes.is_empty() {
            "all presets produce valid planes".into()
        } else {
            format!("invalid: {}", bad_planes.join(", "))
        },
    });

    // Empty weight never exceeds max takeoff weight
    let overweight: Vec<_> = catalog
        .iter()
        .filter(|a| a.empty_weight_kg > a.max_weight_kg)
        .map(|a| a.id.as_str())
        .collect();
    results.push(TestResult {
        name: "catalog_weights_ordered".into(),
        passed: overweight.is_empty(),
        detail: if overweight.is_empty() {
            "empty weight <= max weight everywhere".into()
        } else {
            format!("inverted weights: {}", overweight.join(", "))
        },
    });

    for maker in [Manufacturer::Boeing, Manufacturer::Airbus, Manufacturer::Cessna] {
        let filter = AircraftFilter {
            manufacturer: Some(maker),
            ..AircraftFilter::default()
        };
        let count = catalog.filter(&filter).len();
        results.push(TestResult {
            name: format!("catalog_has_{}", maker.name().to_lowercase()),
            passed: count > 0,
            detail: format!("{} {} aircraft", count, maker.name()),
        });
    }

    if verbose {
        println!("  Wing loading (kg/m²):");
        for a in catalog.iter() {
            println!("    {:18} {:7.1}", a.name, a.wing_loading());
        }
    }

    results
}

// ── 2. Force Model ──────────────────────────────────────────────────────

fn validate_force_model(verbose: bool) -> Vec<TestResult> {
    println!("--- Force Model ---");
    let mut results = Vec::new();

    // Density falls monotonically across the altitude control range
    let densities: Vec<f64> = (0..=12)
        .map(|k| physics::air_density(k as f64 * 1000.0))
        .collect();
    results.push(TestResult {
        name: "density_decreasing".into(),
        passed: densities.windows(2).all(|w| w[1] < w[0]),
        detail: format!(
            "ρ(0)={:.3} ρ(12000)={:.3}",
            densities[0],
            densities[densities.len() - 1]
        ),
    });

    // Lift grows with speed; stall drops it
    let mut params = FlightParameters::default();
    let lift_at = |params: &mut FlightParameters, kind: ParameterKind, v: f64| {
        params.set(kind, v);
        physics::compute_forces(params).lift
    };
    let slow = lift_at(&mut params, ParameterKind::Airspeed, 150.0);
    let fast = lift_at(&mut params, ParameterKind::Airspeed, 300.0);
    results.push(TestResult {
        name: "lift_grows_with_speed".into(),
        passed: (fast / slow - 4.0).abs() < 1e-9,
        detail: format!("2× speed → {:.2}× lift", fast / slow),
    });

    let attached = lift_at(&mut params, ParameterKind::AngleOfAttack, 15.0);
    let stalled = lift_at(&mut params, ParameterKind::AngleOfAttack, 16.0);
    results.push(TestResult {
        name: "stall_cuts_lift".into(),
        passed: (stalled / attached - 0.3).abs() < 1e-9,
        detail: format!("AoA 16° lift is {:.0}% of AoA 15°", stalled / attached * 100.0),
    });

    // Every control value in range validates; just outside does not
    let mut range_ok = true;
    for kind in ParameterKind::ALL {
        if let Some((min, max)) = kind.control_range() {
            let mut p = FlightParameters::default();
            p.set(kind, min);
            range_ok &= physics::validate_parameters(&p).is_empty();
            p.set(kind, max);
            range_ok &= physics::validate_parameters(&p).is_empty();
            p.set(kind, max + 1.0);
            range_ok &= !physics::validate_parameters(&p).is_empty();
        }
    }
    results.push(TestResult {
        name: "control_ranges_validate".into(),
        passed: range_ok,
        detail: "range endpoints accepted, overshoot rejected".into(),
    });

    // Find a throttle that balances thrust and drag at the default state
    let base = FlightParameters::default();
    let balanced_throttle = (0..=100).map(|t| t as f64).find(|&t| {
        let mut p = base;
        p.throttle_pct = t;
        ForceBalance::analyze(&physics::compute_forces(&p))
            .thrust_minus_drag
            .abs()
            < aerolab_logic::constants::balance::THRUST_DRAG_TOLERANCE
    });
    results.push(TestResult {
        name: "throttle_can_match_drag".into(),
        passed: balanced_throttle.is_some(),
        detail: match balanced_throttle {
            Some(t) => format!("thrust ≈ drag at {:.0}% throttle", t),
            None => "no throttle setting balances drag".into(),
        },
    });

    if verbose {
        println!("  Lift vs angle of attack (default state):");
        let mut p = FlightParameters::default();
        for aoa in (-10..=25).step_by(5) {
            p.angle_of_attack_deg = aoa as f64;
            let f = physics::compute_forces(&p);
            println!("    {:4}°: lift {:>10.0} N", aoa, f.lift);
        }
    }

    results
}

// ── 3. Tutorial ─────────────────────────────────────────────────────────

fn validate_tutorial(_verbose: bool) -> Vec<TestResult> {
    println!("--- Tutorial ---");
    let mut results = Vec::new();

    let steps = tutorial::tutorial_steps();
    results.push(TestResult {
        name: "tutorial_five_steps".into(),
        passed: steps.len() == 5,
        detail: format!("{} steps", steps.len()),
    });

    // Walk the lesson by satisfying each step in turn
    let mut progress = TutorialProgress::default();
    progress.start();
    let mut params = FlightParameters::default();
    let moves = [
        (ParameterKind::Airspeed, 260.0),
        (ParameterKind::AngleOfAttack, 10.0),
        (ParameterKind::AngleOfAttack, 17.0),
        (ParameterKind::Altitude, 9000.0),
    ];
    let mut completed = Vec::new();
    for (kind, value) in moves {
        params.set(kind, value);
        completed.extend(progress.evaluate(&params));
    }
    results.push(TestResult {
        name: "tutorial_walkthrough".into(),
        passed: completed == [1, 2, 3, 4] && completed.len() == progress.completable_count(),
        detail: format!("completed steps {:?}", completed),
    });

    // Stall shows a danger message
    let mut stalled = FlightParameters::default();
    stalled.angle_of_attack_deg = 20.0;
    let feedback = tutorial::parameter_feedback(&stalled, &physics::compute_forces(&stalled));
    let danger = matches!(feedback.message, Some((Severity::Danger, _)));
    results.push(TestResult {
        name: "feedback_flags_stall".into(),
        passed: danger,
        detail: format!("{:?}", feedback.message.map(|(s, _)| s)),
    });

    results
}

// ── 4. Records ──────────────────────────────────────────────────────────

fn validate_records(_verbose: bool) -> Vec<TestResult> {
    println!("--- Chat & Leaderboard ---");
    let mut results = Vec::new();

    let config = ChatConfig {
        max_history: 3,
        ..ChatConfig::default()
    };
    let pilot = Auth::new("p1", "Pilot");
    let mut chatting = Chatting::new(pilot.clone(), "", "hangar", GroupChat::empty("hangar"));
    let mut delivered = 0;
    for n in 0..5 {
        chatting.chat = format!("message {}", n);
        if chatting.deliver(&config).is_ok() {
            delivered += 1;
        }
    }
    let kept: Vec<_> = chatting.group_chat.messages_by("p1");
    results.push(TestResult {
        name: "chat_history_bounded".into(),
        passed: delivered == 5 && kept == ["message 2", "message 3", "message 4"],
        detail: format!("{} delivered, kept {:?}", delivered, kept),
    });

    chatting.chat = "wrong room".into();
    chatting.chat_id = "tower".into();
    let rejected = chatting.deliver(&config).is_err() && chatting.chat == "wrong room";
    results.push(TestResult {
        name: "chat_room_mismatch".into(),
        passed: rejected,
        detail: "message for another room is refused and kept".into(),
    });

    let mut group = Group::empty("weekly");
    group.record(pilot.clone(), "2nd");
    group.record(Auth::new("p2", "Navigator"), "1st");
    group.record(pilot, "1st");
    results.push(TestResult {
        name: "group_record_in_place".into(),
        passed: group.entries.len() == 2
            && group.position_of("p1") == Some(1)
            && group.ranking_of("p1") == Some("1st"),
        detail: format!("{} entries, p1 at {:?}", group.entries.len(), group.position_of("p1")),
    });

    let weather = Weather::default();
    results.push(TestResult {
        name: "default_weather_valid".into(),
        passed: validate_weather(&weather).is_empty(),
        detail: format!("{}, {} at {:.1}°C", weather.city, weather.country, weather.temperature),
    });

    results
}

// ── 5. Engine Runs ──────────────────────────────────────────────────────

fn validate_engine_runs(config: &EngineConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Engine Runs ---");
    let mut results = Vec::new();

    let mut engine = match FlightEngine::new(config.clone()) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "engine_create".into(),
                passed: false,
                detail: format!("{}", e),
            });
            return results;
        }
    };

    let ids: Vec<String> = engine.catalog().iter().map(|a| a.id.clone()).collect();
    for id in ids {
        if let Err(e) = engine.select_aircraft(&id) {
            results.push(TestResult {
                name: format!("engine_{}", id),
                passed: false,
                detail: format!("{}", e),
            });
            continue;
        }
        engine.reset();
        engine.start();

        // 30 simulated seconds at 60 FPS
        let mut steps = 0;
        for _ in 0..(30 * 60) {
            steps += engine.update(1.0 / 60.0);
        }
        let state = *engine.flight_state();
        let finite = [state.x, state.y, state.vx, state.vy].iter().all(|v| v.is_finite());
        let inside = (viewport::MIN_X..=viewport::MAX_X).contains(&state.x)
            && (viewport::MIN_Y..=viewport::MAX_Y).contains(&state.y);

        results.push(TestResult {
            name: format!("engine_{}_stable", id),
            passed: finite && inside && steps > 0,
            detail: format!(
                "{} steps, t={:.1}s, pos=({:.0},{:.0})",
                steps,
                engine.sim_time(),
                state.x,
                state.y
            ),
        });

        if verbose {
            let f = engine.forces();
            println!(
                "  {:18} L={:>10.0} D={:>8.0} T={:>8.0} W={:>10.0}",
                id, f.lift, f.drag, f.thrust, f.weight
            );
        }
    }

    // Paused engine ignores time
    engine.pause();
    let before = engine.sim_time();
    let ran = engine.update(5.0);
    results.push(TestResult {
        name: "engine_paused_noop".into(),
        passed: ran == 0 && engine.sim_time() == before,
        detail: "update while paused runs no steps".into(),
    });

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &EngineConfig) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let engine = FlightEngine::new(config.clone()).map(|mut e| {
        e.start();
        for _ in 0..50 {
            e.update(0.1);
        }
        e
    });
    let engine = match engine {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "persistence_setup".into(),
                passed: false,
                detail: format!("{}", e),
            });
            return results;
        }
    };

    let mut buffer = Vec::new();
    let saved = persistence::save_session(&mut buffer, &engine.snapshot());
    let loaded = saved
        .map_err(|e| e.to_string())
        .and_then(|_| persistence::load_session(&buffer[..]).map_err(|e| e.to_string()));

    results.push(TestResult {
        name: "persistence_roundtrip".into(),
        passed: matches!(&loaded, Ok(s) if *s == engine.snapshot()),
        detail: match &loaded {
            Ok(_) => format!("{} bytes", buffer.len()),
            Err(e) => e.clone(),
        },
    });

    results
}
