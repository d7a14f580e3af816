//! Fade curves and gain automation.

use serde::{Deserialize, Serialize};

/// Shape of a fade curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FadeShape {
    #[default]
    Logarithmic,
    Linear,
    SCurve,
    Exponential,
}

/// Direction of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeKind {
    In,
    Out,
}

const LOG_BASE: f64 = 10.0;
const EXP_FLOOR: f64 = 0.01;

impl FadeShape {
    /// Gain at `progress` (0..=1) through a fade of this shape.
    pub fn gain(self, kind: FadeKind, progress: f64) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        let value = match (self, kind) {
            (FadeShape::Linear, FadeKind::In) => p,
            (FadeShape::Linear, FadeKind::Out) => 1.0 - p,
            (FadeShape::Logarithmic, FadeKind::In) => {
                (1.0 + LOG_BASE * p).ln() / (1.0 + LOG_BASE).ln()
            }
            (FadeShape::Logarithmic, FadeKind::Out) => {
                (1.0 + LOG_BASE * (1.0 - p)).ln() / (1.0 + LOG_BASE).ln()
            }
            (FadeShape::SCurve, FadeKind::In) => {
                (std::f64::consts::PI * p - std::f64::consts::FRAC_PI_2).sin() / 2.0 + 0.5
            }
            (FadeShape::SCurve, FadeKind::Out) => {
                (std::f64::consts::PI * p + std::f64::consts::FRAC_PI_2).sin() / 2.0 + 0.5
            }
            (FadeShape::Exponential, FadeKind::In) => EXP_FLOOR * (1.0 / EXP_FLOOR).powf(p),
            (FadeShape::Exponential, FadeKind::Out) => EXP_FLOOR.powf(p),
        };
        value as f32
    }
}

/// A fade attached to a track: shape plus length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub shape: FadeShape,
    pub duration: f64,
}

impl Fade {
    pub fn new(duration: f64, shape: FadeShape) -> Self {
        Self { shape, duration }
    }
}

/// A fade ramp placed on the device clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeAutomation {
    pub kind: FadeKind,
    pub shape: FadeShape,
    /// Device time the ramp starts (may be in the past).
    pub start: f64,
    pub duration: f64,
}

impl FadeAutomation {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn value_at(&self, time: f64) -> f32 {
        if self.duration <= 0.0 {
            return self.shape.gain(self.kind, 1.0);
        }
        self.shape
            .gain(self.kind, (time - self.start) / self.duration)
    }
}

/// Evaluate a list of ramps at `time`.
///
/// Before the first ramp the value is unity; inside a ramp it follows the
/// curve; after a ramp its final value holds until the next one starts.
pub(crate) fn automation_gain(ramps: &[FadeAutomation], time: f64) -> f32 {
    let mut current: Option<&FadeAutomation> = None;
    for ramp in ramps {
        if ramp.start <= time && current.map_or(true, |c| ramp.start >= c.start) {
            current = Some(ramp);
        }
    }

    match current {
        None => 1.0,
        Some(ramp) if time >= ramp.end() => ramp.value_at(ramp.end()),
        Some(ramp) => ramp.value_at(time),
    }
}
