//! Attribute-based widget configuration.
//!
//! Parsing never fails as a whole: each malformed value is reported as a
//! [`ConfigParseFailure`], logged, and replaced by the documented default for
//! that attribute.

use std::time::Duration;

use thiserror::Error;

use arcsweep_engine::anim::{AnimationSpec, Easing};
use arcsweep_engine::arc::{ArcStyle, SweepState};
use arcsweep_engine::paint::{Color, GradientSpec};

use crate::policy::{AnimationOrigin, AnimationPolicy, AnimationTrigger};

/// A malformed configuration attribute. The default was used instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value `{value}` for `{key}`: {reason}")]
pub struct ConfigParseFailure {
    pub key: String,
    pub value: String,
    pub reason: String,
}

impl ConfigParseFailure {
    fn new(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self { key: key.to_string(), value: value.to_string(), reason: reason.into() }
    }
}

/// Widget configuration, one field per recognised attribute.
#[derive(Debug, Clone)]
pub struct ArcConfig {
    /// `startAngle`, degrees.
    pub start_angle: f32,
    /// `sweepAngle`, degrees.
    pub sweep_angle: f32,
    /// `destinationSweepAngle`, degrees.
    pub destination_sweep_angle: f32,
    /// `strokeWidth` / `strokeWidthPx`, logical pixels.
    pub stroke_width: f32,
    /// `useAnimation`
    pub use_animation: bool,
    /// `autoAnimation`
    pub auto_animation: bool,
    /// `arcColor`. Unset means the renderer's default color.
    pub arc_color: Option<Color>,
    /// `gradientColors`. `None` when the attribute was not given.
    pub gradient_colors: Option<Vec<Color>>,
    /// `gradientColorPositions`. `None` when the attribute was not given.
    pub gradient_positions: Option<Vec<f32>>,
    /// `animationDuration`, milliseconds. Unset means the preset for the
    /// trigger: slow for auto-play, fast for explicit starts.
    pub animation_duration: Option<Duration>,
    /// `animationEasing`
    pub animation_easing: Easing,
    /// `animationOrigin`: `zero` or `current`.
    pub animation_origin: AnimationOrigin,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            start_angle: ArcStyle::DEFAULT_START_ANGLE,
            sweep_angle: SweepState::DEFAULT_SWEEP,
            destination_sweep_angle: SweepState::DEFAULT_SWEEP,
            stroke_width: ArcStyle::DEFAULT_STROKE_WIDTH,
            use_animation: false,
            auto_animation: false,
            arc_color: None,
            gradient_colors: None,
            gradient_positions: None,
            animation_duration: None,
            animation_easing: AnimationSpec::FAST.easing,
            animation_origin: AnimationOrigin::Zero,
        }
    }
}

impl ArcConfig {
    /// Two black stops, used for whichever gradient half is missing.
    pub const DEFAULT_GRADIENT_COLORS: [Color; 2] = [Color::BLACK, Color::BLACK];
    pub const DEFAULT_GRADIENT_POSITIONS: [f32; 2] = [0.0, 1.0];

    /// Builds a config from `(name, value)` pairs.
    ///
    /// Later pairs override earlier ones. Unknown names are ignored.
    pub fn from_attributes<'a, I>(pairs: I) -> (Self, Vec<ConfigParseFailure>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        let mut failures = Vec::new();

        for (key, value) in pairs {
            if let Err(failure) = config.apply(key.trim(), value.trim()) {
                log::warn!("{failure}; using default");
                failures.push(failure);
            }
        }

        (config, failures)
    }

    /// Parses `key = value` lines. Blank lines and lines starting with `#`
    /// are skipped.
    pub fn parse_block(text: &str) -> (Self, Vec<ConfigParseFailure>) {
        let mut pairs = Vec::new();
        let mut failures = Vec::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => pairs.push((key, value)),
                None => {
                    let failure = ConfigParseFailure::new(line, "", "expected `key = value`");
                    log::warn!("{failure}");
                    failures.push(failure);
                }
            }
        }

        let (config, mut attr_failures) = Self::from_attributes(pairs);
        failures.append(&mut attr_failures);
        (config, failures)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigParseFailure> {
        match key {
            "startAngle" => {
                self.start_angle = ArcStyle::DEFAULT_START_ANGLE;
                self.start_angle = parse_angle(key, value)?;
            }
            "sweepAngle" => {
                self.sweep_angle = SweepState::DEFAULT_SWEEP;
                self.sweep_angle = parse_angle(key, value)?;
            }
            "destinationSweepAngle" => {
                self.destination_sweep_angle = SweepState::DEFAULT_SWEEP;
                self.destination_sweep_angle = parse_angle(key, value)?;
            }
            "strokeWidth" | "strokeWidthPx" => {
                self.stroke_width = ArcStyle::DEFAULT_STROKE_WIDTH;
                self.stroke_width = parse_px(key, value)?;
            }
            "useAnimation" => {
                self.use_animation = false;
                self.use_animation = parse_bool(key, value)?;
            }
            "autoAnimation" => {
                self.auto_animation = false;
                self.auto_animation = parse_bool(key, value)?;
            }
            "arcColor" => {
                self.arc_color = None;
                self.arc_color = Some(parse_color(key, value)?);
            }
            "gradientColors" => {
                self.gradient_colors = Some(Self::DEFAULT_GRADIENT_COLORS.to_vec());
                self.gradient_colors = Some(parse_list(key, value, parse_color)?);
            }
            "gradientColorPositions" => {
                self.gradient_positions = Some(Self::DEFAULT_GRADIENT_POSITIONS.to_vec());
                self.gradient_positions = Some(parse_list(key, value, parse_position)?);
            }
            "animationDuration" => {
                self.animation_duration = None;
                self.animation_duration = Some(parse_duration(key, value)?);
            }
            "animationEasing" => {
                self.animation_easing = AnimationSpec::FAST.easing;
                self.animation_easing = value
                    .parse::<Easing>()
                    .map_err(|e| ConfigParseFailure::new(key, value, e.to_string()))?;
            }
            "animationOrigin" => {
                self.animation_origin = AnimationOrigin::Zero;
                self.animation_origin = match value.to_ascii_lowercase().as_str() {
                    "zero" => AnimationOrigin::Zero,
                    "current" => AnimationOrigin::Current,
                    _ => return Err(ConfigParseFailure::new(key, value, "expected `zero` or `current`")),
                };
            }
            _ => log::debug!("ignoring unknown attribute `{key}`"),
        }
        Ok(())
    }

    /// Arc style from the configured start angle and stroke width.
    pub fn style(&self) -> ArcStyle {
        ArcStyle::new(self.start_angle, self.stroke_width)
    }

    /// Animation policy from `useAnimation`, `autoAnimation` and the timing
    /// attributes.
    ///
    /// Without `animationDuration`, auto-play uses [`AnimationSpec::SLOW`]'s
    /// duration and explicit starts use [`AnimationSpec::FAST`]'s.
    pub fn policy(&self) -> AnimationPolicy {
        let (trigger, preset) = if self.auto_animation {
            (AnimationTrigger::Auto, AnimationSpec::SLOW)
        } else {
            (AnimationTrigger::Manual, AnimationSpec::FAST)
        };
        let duration = self.animation_duration.unwrap_or(preset.duration);

        AnimationPolicy {
            enabled: self.use_animation,
            trigger,
            origin: self.animation_origin,
            spec: AnimationSpec::new(duration, self.animation_easing),
        }
    }
}

/// Gradient stops from optional color and position lists.
///
/// `None` when neither list is set. A missing list uses its two-stop
/// default; mismatched lengths fall back to the default ramp with a warning.
pub(crate) fn gradient_from_parts(
    colors: Option<&[Color]>,
    positions: Option<&[f32]>,
) -> Option<GradientSpec> {
    if colors.is_none() && positions.is_none() {
        return None;
    }
    let colors = colors.unwrap_or(&ArcConfig::DEFAULT_GRADIENT_COLORS[..]);
    let positions = positions.unwrap_or(&ArcConfig::DEFAULT_GRADIENT_POSITIONS[..]);
    Some(GradientSpec::from_parts_or_default(colors, positions))
}

// ── value parsers ─────────────────────────────────────────────────────────

fn parse_angle(key: &str, value: &str) -> Result<f32, ConfigParseFailure> {
    let v: f32 = value
        .parse()
        .map_err(|_| ConfigParseFailure::new(key, value, "expected a number of degrees"))?;
    if !v.is_finite() {
        return Err(ConfigParseFailure::new(key, value, "angle must be finite"));
    }
    Ok(v)
}

fn parse_px(key: &str, value: &str) -> Result<f32, ConfigParseFailure> {
    let digits = value.strip_suffix("px").map(str::trim_end).unwrap_or(value);
    let v: f32 = digits
        .parse()
        .map_err(|_| ConfigParseFailure::new(key, value, "expected a pixel size"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(ConfigParseFailure::new(key, value, "pixel size must be finite and non-negative"));
    }
    Ok(v)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigParseFailure> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigParseFailure::new(key, value, "expected `true` or `false`")),
    }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, ConfigParseFailure> {
    let digits = value.strip_suffix("ms").map(str::trim_end).unwrap_or(value);
    digits
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigParseFailure::new(key, value, "expected whole milliseconds"))
}

fn parse_position(key: &str, value: &str) -> Result<f32, ConfigParseFailure> {
    let v: f32 = value
        .parse()
        .map_err(|_| ConfigParseFailure::new(key, value, "expected a stop position"))?;
    if !v.is_finite() {
        return Err(ConfigParseFailure::new(key, value, "stop position must be finite"));
    }
    Ok(v)
}

/// `#AARRGGBB`, `#RRGGBB` (opaque) or `0xAARRGGBB`.
fn parse_color(key: &str, value: &str) -> Result<Color, ConfigParseFailure> {
    let (hex, short_allowed) = if let Some(rest) = value.strip_prefix('#') {
        (rest, true)
    } else if let Some(rest) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        (rest, false)
    } else {
        return Err(ConfigParseFailure::new(key, value, "color must start with `#` or `0x`"));
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigParseFailure::new(key, value, "color contains non-hex digits"));
    }

    let argb = match hex.len() {
        8 => u32::from_str_radix(hex, 16),
        6 if short_allowed => u32::from_str_radix(hex, 16).map(|rgb| 0xFF00_0000 | rgb),
        n => {
            return Err(ConfigParseFailure::new(
                key,
                value,
                format!("expected 8 hex digits (or 6 after `#`), got {n}"),
            ));
        }
    }
    .map_err(|e| ConfigParseFailure::new(key, value, e.to_string()))?;

    Ok(Color::from_argb(argb))
}

fn parse_list<T>(
    key: &str,
    value: &str,
    item: fn(&str, &str) -> Result<T, ConfigParseFailure>,
) -> Result<Vec<T>, ConfigParseFailure> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    let items = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| item(key, s).map_err(|f| ConfigParseFailure::new(key, value, f.reason)))
        .collect::<Result<Vec<_>, _>>()?;

    if items.is_empty() {
        return Err(ConfigParseFailure::new(key, value, "list is empty"));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(cfg: &ArcConfig) -> Option<GradientSpec> {
        gradient_from_parts(cfg.gradient_colors.as_deref(), cfg.gradient_positions.as_deref())
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn empty_attributes_give_documented_defaults() {
        let (cfg, failures) = ArcConfig::from_attributes(Vec::<(&str, &str)>::new());
        assert!(failures.is_empty());
        assert_eq!(cfg.start_angle, 135.0);
        assert_eq!(cfg.sweep_angle, 270.0);
        assert_eq!(cfg.destination_sweep_angle, 270.0);
        assert_eq!(cfg.stroke_width, 40.0);
        assert!(!cfg.use_animation);
        assert!(!cfg.auto_animation);
        assert_eq!(cfg.arc_color, None);
        assert!(gradient(&cfg).is_none());
        assert_eq!(cfg.animation_duration, None);
        assert_eq!(cfg.animation_easing.name(), Some("decelerate"));
        assert_eq!(cfg.policy().spec.duration, AnimationSpec::FAST.duration);
    }

    #[test]
    fn auto_play_defaults_to_slow_preset() {
        let (cfg, _) = ArcConfig::from_attributes([("useAnimation", "true"), ("autoAnimation", "true")]);
        let policy = cfg.policy();
        assert!(policy.autoplays());
        assert_eq!(policy.spec.duration, AnimationSpec::SLOW.duration);
        assert_eq!(policy.spec.easing.name(), Some("decelerate"));
    }

    #[test]
    fn explicit_duration_wins_over_presets() {
        let (cfg, _) = ArcConfig::from_attributes([
            ("useAnimation", "true"),
            ("autoAnimation", "true"),
            ("animationDuration", "250"),
        ]);
        assert_eq!(cfg.policy().spec.duration, Duration::from_millis(250));
    }

    #[test]
    fn recognised_attributes_are_applied() {
        let (cfg, failures) = ArcConfig::from_attributes([
            ("startAngle", "90"),
            ("sweepAngle", "0"),
            ("destinationSweepAngle", "180.5"),
            ("strokeWidthPx", "24px"),
            ("useAnimation", "true"),
            ("autoAnimation", "TRUE"),
            ("arcColor", "#FF00FF00"),
            ("animationDuration", "1000ms"),
            ("animationEasing", "bounce"),
            ("animationOrigin", "current"),
        ]);
        assert!(failures.is_empty(), "{failures:?}");
        assert_eq!(cfg.start_angle, 90.0);
        assert_eq!(cfg.sweep_angle, 0.0);
        assert_eq!(cfg.destination_sweep_angle, 180.5);
        assert_eq!(cfg.stroke_width, 24.0);
        assert!(cfg.use_animation && cfg.auto_animation);
        assert_eq!(cfg.arc_color.map(Color::to_argb), Some(0xFF00_FF00));
        assert_eq!(cfg.animation_duration, Some(Duration::from_millis(1000)));
        assert_eq!(cfg.animation_easing.name(), Some("bounce"));

        let policy = cfg.policy();
        assert!(policy.enabled);
        assert_eq!(policy.trigger, AnimationTrigger::Auto);
        assert_eq!(policy.origin, AnimationOrigin::Current);
    }

    // ── fallbacks ─────────────────────────────────────────────────────────

    #[test]
    fn malformed_values_fall_back_and_are_reported() {
        let (cfg, failures) = ArcConfig::from_attributes([
            ("startAngle", "north"),
            ("strokeWidth", "-4"),
            ("useAnimation", "yes"),
            ("arcColor", "red"),
            ("animationEasing", "wobble"),
        ]);
        assert_eq!(failures.len(), 5);
        assert_eq!(failures[0].key, "startAngle");
        assert_eq!(failures[0].value, "north");
        assert_eq!(cfg.start_angle, 135.0);
        assert_eq!(cfg.stroke_width, 40.0);
        assert!(!cfg.use_animation);
        assert_eq!(cfg.arc_color, None);
        assert_eq!(cfg.animation_easing.name(), Some("decelerate"));
    }

    #[test]
    fn malformed_value_replaces_earlier_valid_one_with_default() {
        let (cfg, failures) =
            ArcConfig::from_attributes([("sweepAngle", "90"), ("sweepAngle", "NaN")]);
        assert_eq!(failures.len(), 1);
        assert_eq!(cfg.sweep_angle, 270.0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (cfg, failures) = ArcConfig::from_attributes([("arcShadow", "1")]);
        assert!(failures.is_empty());
        assert_eq!(cfg.start_angle, 135.0);
        assert_eq!(cfg.arc_color, None);
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn color_forms() {
        assert_eq!(parse_color("k", "#80FF0000").map(Color::to_argb), Ok(0x80FF_0000));
        assert_eq!(parse_color("k", "#0000FF").map(Color::to_argb), Ok(0xFF00_00FF));
        assert_eq!(parse_color("k", "0xFF00FF00").map(Color::to_argb), Ok(0xFF00_FF00));
        assert!(parse_color("k", "0x00FF00").is_err());
        assert!(parse_color("k", "#12345").is_err());
        assert!(parse_color("k", "#GG0000").is_err());
    }

    // ── gradient ──────────────────────────────────────────────────────────

    #[test]
    fn gradient_lists_are_parsed() {
        let (cfg, failures) = ArcConfig::from_attributes([
            ("gradientColors", "#FFFF0000, #FF0000FF"),
            ("gradientColorPositions", "[0, 1]"),
        ]);
        assert!(failures.is_empty());
        let spec = gradient(&cfg).unwrap();
        let stops = spec.stops();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].color.to_argb(), 0xFFFF_0000);
        assert_eq!(stops[1].color.to_argb(), 0xFF00_00FF);
        assert_eq!(stops[1].position, 1.0);
    }

    #[test]
    fn missing_positions_default_to_ends() {
        let (cfg, _) = ArcConfig::from_attributes([("gradientColors", "#FFFF0000,#FF0000FF")]);
        let spec = gradient(&cfg).unwrap();
        assert_eq!(spec.stops()[0].position, 0.0);
        assert_eq!(spec.stops()[1].position, 1.0);
    }

    #[test]
    fn mismatched_gradient_uses_black_ramp() {
        let (cfg, failures) = ArcConfig::from_attributes([
            ("gradientColors", "#FFFF0000,#FF0000FF"),
            ("gradientColorPositions", "0"),
        ]);
        assert!(failures.is_empty());
        let spec = gradient(&cfg).unwrap();
        assert_eq!(spec, GradientSpec::default_ramp());
    }

    #[test]
    fn bad_list_item_reports_whole_value() {
        let (cfg, failures) =
            ArcConfig::from_attributes([("gradientColors", "#FFFF0000, blue")]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].value, "#FFFF0000, blue");
        assert_eq!(cfg.gradient_colors.as_deref(), Some(&ArcConfig::DEFAULT_GRADIENT_COLORS[..]));
    }

    // ── parse_block ───────────────────────────────────────────────────────

    #[test]
    fn block_skips_comments_and_reports_bad_lines() {
        let text = "\
# demo
startAngle = 120
arcColor = #FF336699

not a pair
useAnimation=true
";
        let (cfg, failures) = ArcConfig::parse_block(text);
        assert_eq!(cfg.start_angle, 120.0);
        assert_eq!(cfg.arc_color.map(Color::to_argb), Some(0xFF33_6699));
        assert!(cfg.use_animation);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].key, "not a pair");
    }
}
