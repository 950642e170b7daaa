//! Guided lessons and live parameter feedback.
//!
//! The tutorial walks a learner through five steps. Each interactive step
//! watches one parameter and completes once that parameter reaches a
//! target range. The final step is informational and only ends when the
//! learner moves on.
//!
//! Separately, [`parameter_feedback`] looks at the current parameters and
//! forces and produces a one-line message plus a list of tips.

use serde::{Deserialize, Serialize};

use crate::physics::{is_stalling, FlightParameters, ForceBalance, Forces, ParameterKind};

#[derive(Debug, Clone, PartialEq)]
pub struct TutorialStep {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub target: ParameterKind,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub explanation: &'static str,
    /// Never auto-completes; the learner advances manually.
    pub informational: bool,
}

impl TutorialStep {
    /// Whether `params` satisfies this step's target.
    pub fn is_satisfied(&self, params: &FlightParameters) -> bool {
        if self.informational {
            return false;
        }
        let value = params.get(self.target);
        match (self.min_value, self.max_value) {
            (Some(min), Some(max)) => (min..=max).contains(&value),
            (Some(min), None) => value >= min,
            (None, Some(max)) => value <= max,
            (None, None) => false,
        }
    }
}

/// The five lesson steps, in order.
pub fn tutorial_steps() -> Vec<TutorialStep> {
    vec![
        TutorialStep {
            id: 1,
            title: "Understanding Airspeed",
            description: "Airspeed is crucial for generating lift. Try increasing airspeed from 100 to 300 km/h and observe how lift increases.",
            target: ParameterKind::Airspeed,
            min_value: Some(250.0),
            max_value: None,
            explanation: "Higher airspeed means more air flowing over the wings, creating greater lift according to the formula L = ½ρv²ACₗ",
            informational: false,
        },
        TutorialStep {
            id: 2,
            title: "Angle of Attack Effects",
            description: "Adjust the angle of attack between 0° and 10°. Notice how lift increases, but be careful not to exceed 15°!",
            target: ParameterKind::AngleOfAttack,
            min_value: Some(8.0),
            max_value: Some(12.0),
            explanation: "Increasing angle of attack deflects more air downward, creating more lift until the critical angle where stall occurs.",
            informational: false,
        },
        TutorialStep {
            id: 3,
            title: "Stall Recognition",
            description: "Carefully increase angle of attack beyond 15° to experience a stall. Watch how lift drops dramatically!",
            target: ParameterKind::AngleOfAttack,
            min_value: Some(16.0),
            max_value: None,
            explanation: "At high angles of attack, airflow separates from the wing's upper surface, causing a sudden loss of lift.",
            informational: false,
        },
        TutorialStep {
            id: 4,
            title: "Altitude Effects",
            description: "Change altitude from sea level to 10,000m. Notice how thinner air affects lift generation.",
            target: ParameterKind::Altitude,
            min_value: Some(8000.0),
            max_value: None,
            explanation: "Air density decreases with altitude, requiring higher speeds or larger angles of attack to maintain the same lift.",
            informational: false,
        },
        TutorialStep {
            id: 5,
            title: "Thrust vs Drag Balance - Flight Analysis",
            description: "Observe how thrust and drag forces interact. Try different throttle settings and watch the real-time balance analysis below.",
            target: ParameterKind::Throttle,
            min_value: None,
            max_value: None,
            explanation: "For steady flight, thrust must equal drag. This is an ongoing analysis - experiment with different settings to understand force relationships.",
            informational: true,
        },
    ]
}

/// A learner's position in the tutorial.
#[derive(Debug, Clone)]
pub struct TutorialProgress {
    steps: Vec<TutorialStep>,
    current: usize,
    completed: Vec<u32>,
    active: bool,
}

impl Default for TutorialProgress {
    fn default() -> Self {
        Self {
            steps: tutorial_steps(),
            current: 0,
            completed: Vec::new(),
            active: false,
        }
    }
}

impl TutorialProgress {
    /// Begin (or restart) the tutorial from the first step.
    pub fn start(&mut self) {
        self.current = 0;
        self.completed.clear();
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        !self.active && self.current + 1 >= self.steps.len()
    }

    pub fn current_step(&self) -> Option<&TutorialStep> {
        if self.active {
            self.steps.get(self.current)
        } else {
            None
        }
    }

    pub fn completed(&self) -> &[u32] {
        &self.completed
    }

    /// Number of steps that can be completed (informational ones excluded).
    pub fn completable_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.informational).count()
    }

    /// Check the current step against `params`.
    ///
    /// Each satisfied step is marked complete and the tutorial moves on,
    /// so a step whose target already holds completes as soon as it becomes
    /// current. Returns the ids completed by this call, in order.
    pub fn evaluate(&mut self, params: &FlightParameters) -> Vec<u32> {
        let mut newly_completed = Vec::new();
        while let Some(step) = self.current_step() {
            if !step.is_satisfied(params) || self.completed.contains(&step.id) {
                break;
            }
            let id = step.id;
            self.completed.push(id);
            newly_completed.push(id);
            if self.current + 1 >= self.steps.len() {
                break;
            }
            self.current += 1;
        }
        newly_completed
    }

    /// Move forward; past the last step this ends the tutorial.
    pub fn next(&mut self) {
        if !self.active {
            return;
        }
        if self.current + 1 < self.steps.len() {
            self.current += 1;
        } else {
            self.active = false;
        }
    }

    pub fn previous(&mut self) {
        if self.active {
            self.current = self.current.saturating_sub(1);
        }
    }

    /// Leave the tutorial without finishing it.
    pub fn stop(&mut self) {
        self.active = false;
        self.current = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Danger,
    Good,
}

/// Live commentary on the current flight parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// The most relevant message; later checks take precedence.
    pub message: Option<(Severity, String)>,
    pub tips: Vec<String>,
}

/// Build feedback for the current parameters.
///
/// Checks run in a fixed order (airspeed, angle of attack, altitude, force
/// balance); each one that fires replaces the message and appends its tips.
pub fn parameter_feedback(params: &FlightParameters, forces: &Forces) -> Feedback {
    let mut feedback = Feedback::default();
    let mut say = |severity: Severity, message: &str, tips: &[&str]| {
        feedback.message = Some((severity, message.to_string()));
        feedback.tips.extend(tips.iter().map(|t| t.to_string()));
    };

    if params.airspeed_kmh < 150.0 {
        say(
            Severity::Warning,
            "Low airspeed - insufficient lift for most aircraft.",
            &[
                "Increase speed or angle of attack to generate more lift",
                "Formula: Lift = ½ × air density × velocity² × wing area × lift coefficient",
            ],
        );
    } else if params.airspeed_kmh > 400.0 {
        say(
            Severity::Info,
            "High speed flight - drag increases significantly.",
            &[
                "Drag increases with velocity squared - doubling speed quadruples drag",
                "Consider reducing throttle to maintain efficient flight",
            ],
        );
    }

    let aoa = params.angle_of_attack_deg;
    if aoa > 12.0 && !is_stalling(params) {
        say(
            Severity::Warning,
            "Approaching critical angle of attack. Stall warning!",
            &[
                "Most aircraft stall between 15-18° angle of attack",
                "Reduce angle of attack or increase airspeed to maintain safe flight",
            ],
        );
    } else if is_stalling(params) {
        say(
            Severity::Danger,
            "STALL CONDITION - Airflow separated from wing surface!",
            &[
                "Immediately reduce angle of attack and increase throttle",
                "In real flight, push the nose down to recover from stall",
            ],
        );
    } else if aoa < 0.0 {
        say(
            Severity::Info,
            "Negative angle of attack - aircraft will descend rapidly.",
            &["Negative angles create downward lift - useful for aerobatic maneuvers"],
        );
    }

    if params.altitude_m > 8000.0 {
        say(
            Severity::Info,
            "High altitude - reduced air density affects performance.",
            &[
                "Air density at 10,000m is about 26% of sea level density",
                "Higher speeds or larger angles needed to maintain same lift",
            ],
        );
    }

    if ForceBalance::analyze(forces).balanced {
        say(
            Severity::Good,
            "Excellent! Forces are well balanced for steady flight.",
            &[
                "This is ideal for cruise flight - minimal energy waste",
                "Small adjustments maintain altitude and speed efficiently",
            ],
        );
    }

    feedback
}
