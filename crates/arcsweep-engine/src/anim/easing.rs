use std::f32::consts::PI;
use std::str::FromStr;

use thiserror::Error;

/// Easing curve: maps normalized elapsed time `t ∈ [0, 1]` to animation
/// progress.
///
/// Presets start at 0 and end at 1 but are not required to stay inside
/// `[0, 1]` in between (`Anticipate` dips below 0, `Overshoot` goes past 1).
#[derive(Debug, Copy, Clone, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Quadratic ease-in: `t²`.
    Accelerate,
    /// Quadratic ease-out: `1 - (1 - t)²`.
    #[default]
    Decelerate,
    /// Cosine ease-in-out.
    AccelerateDecelerate,
    /// Pulls back before moving forward; larger tension pulls further.
    Anticipate { tension: f32 },
    /// Flings past the end then settles; larger tension overshoots further.
    Overshoot { tension: f32 },
    /// Bounces at the end.
    Bounce,
    /// Any caller-supplied curve.
    Custom(fn(f32) -> f32),
}

impl Easing {
    pub const DEFAULT_TENSION: f32 = 2.0;
    pub const ANTICIPATE: Easing = Easing::Anticipate { tension: Self::DEFAULT_TENSION };
    pub const OVERSHOOT: Easing = Easing::Overshoot { tension: Self::DEFAULT_TENSION };

    /// Evaluates the curve. `t` is clamped to `[0, 1]` first.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::Anticipate { tension } => t * t * ((tension + 1.0) * t - tension),
            Easing::Overshoot { tension } => {
                let t = t - 1.0;
                t * t * ((tension + 1.0) * t + tension) + 1.0
            }
            Easing::Bounce => bounce_out(t),
            Easing::Custom(f) => f(t),
        }
    }

    /// Canonical preset name, `None` for custom curves.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Easing::Linear => "linear",
            Easing::Accelerate => "accelerate",
            Easing::Decelerate => "decelerate",
            Easing::AccelerateDecelerate => "accelerate_decelerate",
            Easing::Anticipate { .. } => "anticipate",
            Easing::Overshoot { .. } => "overshoot",
            Easing::Bounce => "bounce",
            Easing::Custom(_) => return None,
        })
    }
}

fn bounce_out(t: f32) -> f32 {
    fn parabola(t: f32) -> f32 {
        t * t * 8.0
    }

    let t = t * 1.1226;
    if t < 0.3535 {
        parabola(t)
    } else if t < 0.7408 {
        parabola(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        parabola(t - 0.8526) + 0.9
    } else {
        parabola(t - 1.0435) + 0.95
    }
}

/// Returned when an easing name does not match any preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing preset `{0}`")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    /// Accepts preset names case-insensitively, ignoring `_`, `-` and spaces
    /// (`accelerate_decelerate`, `AccelerateDecelerate`, `ease-out`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "linear" => Ok(Easing::Linear),
            "accelerate" | "easein" => Ok(Easing::Accelerate),
            "decelerate" | "easeout" => Ok(Easing::Decelerate),
            "acceleratedecelerate" | "easeinout" => Ok(Easing::AccelerateDecelerate),
            "anticipate" => Ok(Easing::ANTICIPATE),
            "overshoot" => Ok(Easing::OVERSHOOT),
            "bounce" => Ok(Easing::Bounce),
            _ => Err(UnknownEasing(s.to_string())),
        }
    }
}
