use arcsweep_engine::anim::AnimationSpec;

/// What starts a sweep run.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AnimationTrigger {
    /// Only an explicit `start_animation` call.
    #[default]
    Manual,
    /// Also once, when the widget first gets a usable size.
    Auto,
}

/// Where a run starts from.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AnimationOrigin {
    /// Always sweep up from 0°.
    #[default]
    Zero,
    /// Continue from the angle currently shown.
    Current,
}

/// Animation behavior of an [`ArcWidget`](crate::ArcWidget).
///
/// Covers the plain, animated and auto-animated arc variants with one type:
/// `enabled == false` is a static arc.
#[derive(Debug, Copy, Clone, Default)]
pub struct AnimationPolicy {
    /// Gate for every run, manual or automatic.
    pub enabled: bool,
    pub trigger: AnimationTrigger,
    pub origin: AnimationOrigin,
    pub spec: AnimationSpec,
}

impl AnimationPolicy {
    /// Animation disabled.
    pub const STATIC: AnimationPolicy = AnimationPolicy {
        enabled: false,
        trigger: AnimationTrigger::Manual,
        origin: AnimationOrigin::Zero,
        spec: AnimationSpec::FAST,
    };

    /// Runs on request with the fast preset.
    pub const fn manual(spec: AnimationSpec) -> Self {
        Self { enabled: true, trigger: AnimationTrigger::Manual, origin: AnimationOrigin::Zero, spec }
    }

    /// Runs once on first layout, and again on request.
    pub const fn auto(spec: AnimationSpec) -> Self {
        Self { enabled: true, trigger: AnimationTrigger::Auto, origin: AnimationOrigin::Zero, spec }
    }

    pub const fn with_origin(mut self, origin: AnimationOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// True when the first layout should start a run.
    #[inline]
    pub fn autoplays(&self) -> bool {
        self.enabled && self.trigger == AnimationTrigger::Auto
    }
}
