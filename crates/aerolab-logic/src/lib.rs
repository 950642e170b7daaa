//! Pure flight-physics and record logic for AeroLab.
//!
//! This crate contains the data records and every computation that is
//! independent of a running session. Functions take plain data and return
//! results, making them unit-testable and reusable from the engine, the
//! headless harness, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`aircraft`] | Bundled aircraft database, search filters, presets |
//! | [`auth`] | Minimal participant identity record |
//! | [`chat`] | Chat rooms as paired author/message entries, delivery |
//! | [`constants`] | Atmosphere and force-model constants |
//! | [`group`] | Leaderboard groups as paired participant/ranking entries |
//! | [`physics`] | Lift/drag/thrust/weight, stall, force balance, Euler stepper |
//! | [`plane`] | Descriptive aircraft record and validation |
//! | [`simulation`] | Flight state snapshot (pressure, height, speeds, plane) |
//! | [`tutorial`] | Guided lesson steps and live parameter feedback |
//! | [`weather`] | Location/conditions record and validation |

pub mod aircraft;
pub mod auth;
pub mod chat;
pub mod constants;
pub mod group;
pub mod physics;
pub mod plane;
pub mod simulation;
pub mod tutorial;
pub mod weather;
