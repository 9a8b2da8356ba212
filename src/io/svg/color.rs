//! Color ramps for choropleth fills.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Color from a 0xRRGGBB literal.
    pub const fn hex(code: u32) -> Self {
        Self { r: (code >> 16) as u8, g: (code >> 8) as u8, b: code as u8 }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Self { r: mix(self.r, other.r), g: mix(self.g, other.g), b: mix(self.b, other.b) }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill for shapes without a value.
pub const NO_DATA: Rgb = Rgb::new(150, 150, 150);

/// Piecewise-linear ramp through evenly spaced anchor colors.
#[derive(Clone, Copy, Debug)]
pub struct Ramp(&'static [Rgb]);

/// ColorBrewer YlOrRd, light to dark.
pub const YL_OR_RD: Ramp = Ramp(&[
    Rgb::hex(0xffffcc), Rgb::hex(0xffeda0), Rgb::hex(0xfed976),
    Rgb::hex(0xfeb24c), Rgb::hex(0xfd8d3c), Rgb::hex(0xfc4e2a),
    Rgb::hex(0xe31a1c), Rgb::hex(0xbd0026), Rgb::hex(0x800026),
]);

/// ColorBrewer RdBu reversed: blue for negative, red for positive.
pub const BU_RD: Ramp = Ramp(&[
    Rgb::hex(0x053061), Rgb::hex(0x2166ac), Rgb::hex(0x4393c3),
    Rgb::hex(0x92c5de), Rgb::hex(0xd1e5f0), Rgb::hex(0xf7f7f7),
    Rgb::hex(0xfddbc7), Rgb::hex(0xf4a582), Rgb::hex(0xd6604d),
    Rgb::hex(0xb2182b), Rgb::hex(0x67001f),
]);

impl Ramp {
    /// Color at position `t` in [0.0, 1.0]; NaN maps to [`NO_DATA`].
    pub fn at(&self, t: f64) -> Rgb {
        if t.is_nan() { return NO_DATA }
        let stops = self.0;
        let last = stops.len() - 1;
        let pos = t.clamp(0.0, 1.0) * last as f64;
        let lo = (pos.floor() as usize).min(last);
        let hi = (lo + 1).min(last);
        stops[lo].lerp(stops[hi], pos - lo as f64)
    }

    /// Color of class `class` out of `classes`, spread across the whole ramp.
    pub fn class_color(&self, class: usize, classes: usize) -> Rgb {
        if classes <= 1 { return self.at(0.5) }
        self.at(class.min(classes - 1) as f64 / (classes - 1) as f64)
    }

    /// Diverging color for `value` on a scale symmetric around zero.
    pub fn diverging(&self, value: f64, max_abs: f64) -> Rgb {
        if !value.is_finite() { return NO_DATA }
        if max_abs <= 0.0 || !max_abs.is_finite() { return self.at(0.5) }
        self.at(0.5 + value / (2.0 * max_abs))
    }
}
