//! Color data types. This module is private but reexported by its parent.

use core::fmt;

/// A floating-point RGBA color value, used for presentation styles such as highlight tints.
///
/// * Color components are linear (gamma = 1), but use the same RGB primaries as sRGB
///   (Rec. 709), and are clamped to the range 0 to 1.
/// * The alpha is not premultiplied.
///
/// Construction rejects NaN, so every `Rgba` compares equal to itself.
#[derive(Clone, Copy, PartialEq)]
pub struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Rgba {
    /// Transparent black (all components zero).
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    /// Black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    /// White.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// Constructs a color from linear components.
    ///
    /// Panics if any component is NaN. Clamps all components to the range 0 to 1.
    #[inline]
    #[track_caller]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        if r.is_nan() || g.is_nan() || b.is_nan() || a.is_nan() {
            panic!("color component is NaN");
        }
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Converts sRGB 8-bits-per-component color to the corresponding linear [`Rgba`] value.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::Rgba;
    ///
    /// assert_eq!(Rgba::from_srgb8([255, 255, 255, 255]), Rgba::WHITE);
    /// assert_eq!(Rgba::from_srgb8([0, 0, 0, 0]), Rgba::TRANSPARENT);
    /// ```
    #[inline]
    pub fn from_srgb8(rgba: [u8; 4]) -> Self {
        Self::new(
            component_from_srgb8(rgba[0]),
            component_from_srgb8(rgba[1]),
            component_from_srgb8(rgba[2]),
            f32::from(rgba[3]) / 255.0,
        )
    }

    /// Converts this color to sRGB (gamma-encoded) 8-bits-per-component form,
    /// the representation most presentation layers accept.
    ///
    /// ```
    /// # extern crate stowage_base as stowage;
    /// use stowage::math::Rgba;
    ///
    /// let color = [0, 50, 127, 200];
    /// assert_eq!(Rgba::from_srgb8(color).to_srgb8(), color);
    /// ```
    #[inline]
    pub fn to_srgb8(self) -> [u8; 4] {
        [
            component_to_srgb8(self.r),
            component_to_srgb8(self.g),
            component_to_srgb8(self.b),
            // Alpha is linear in sRGB too.
            libm::roundf(self.a * 255.0) as u8,
        ]
    }

    /// Returns the same color with a different alpha.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Returns the red color component. Values are linear (gamma = 1) and not premultiplied.
    #[inline]
    pub const fn red(self) -> f32 {
        self.r
    }
    /// Returns the green color component. Values are linear (gamma = 1) and not premultiplied.
    #[inline]
    pub const fn green(self) -> f32 {
        self.g
    }
    /// Returns the blue color component. Values are linear (gamma = 1) and not premultiplied.
    #[inline]
    pub const fn blue(self) -> f32 {
        self.b
    }
    /// Returns the alpha component.
    #[inline]
    pub const fn alpha(self) -> f32 {
        self.a
    }

    /// Returns whether this color is fully transparent.
    #[inline]
    pub fn fully_transparent(self) -> bool {
        self.a <= 0.0
    }
}

impl Eq for Rgba {}

impl fmt::Debug for Rgba {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { r, g, b, a } = *self;
        write!(f, "Rgba({r:?}, {g:?}, {b:?}, {a:?})")
    }
}

#[inline]
fn component_from_srgb8(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        libm::powf((c + 0.055) / 1.055, 2.4)
    }
}

#[inline]
fn component_to_srgb8(c: f32) -> u8 {
    let encoded = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * libm::powf(c, 1.0 / 2.4) - 0.055
    };
    // Clamped by construction, so the cast cannot saturate except at exactly 255.
    libm::roundf(encoded * 255.0) as u8
}
