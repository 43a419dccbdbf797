/// Viewport size in logical pixels.
///
/// This is the measured size the host hands to a widget; it is also the
/// coordinate basis the GPU pipeline uses for the NDC conversion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True once the surface has a non-zero, finite measured size.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// The shorter of the two sides.
    #[inline]
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }
}
