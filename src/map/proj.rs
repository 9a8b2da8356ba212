//! Fitting boundary coordinates into an SVG panel.

use geo::{Coord, CoordsIter, MultiPolygon};

/// Maps boundary coordinates to panel pixels, preserving aspect and flipping Y.
///
/// Longitude/latitude input is drawn as an equirectangular map: x is scaled
/// by the cosine of the middle latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelProjection {
    min_x: f64,
    max_y: f64,
    x_factor: f64,
    wrap: bool,
    scale: f64,
    margin: f64,
    width: f64,
    height: f64,
}

/// True when every coordinate fits within longitude/latitude ranges.
fn is_geographic(min: Coord<f64>, max: Coord<f64>) -> bool {
    min.x >= -180.0 && max.x <= 180.0 && min.y >= -90.0 && max.y <= 90.0
}

/// Move eastern-hemisphere longitudes (e.g. the western Aleutians) west of -180.
fn wrap_longitude(x: f64) -> f64 {
    if x > 0.0 { x - 360.0 } else { x }
}

fn extent<'a>(shapes: impl Iterator<Item = &'a MultiPolygon<f64>>, wrap: bool) -> Option<(Coord<f64>, Coord<f64>)> {
    let mut bounds: Option<(Coord<f64>, Coord<f64>)> = None;
    for coord in shapes.flat_map(|shape| shape.coords_iter()) {
        let x = if wrap { wrap_longitude(coord.x) } else { coord.x };
        let (min, max) = bounds.get_or_insert((Coord { x, y: coord.y }, Coord { x, y: coord.y }));
        min.x = min.x.min(x);
        min.y = min.y.min(coord.y);
        max.x = max.x.max(x);
        max.y = max.y.max(coord.y);
    }
    bounds
}

impl PanelProjection {
    /// Fit `shapes` into a panel `width` pixels wide. Returns `None` when the
    /// shapes have no extent.
    pub fn fit<'a>(shapes: impl Iterator<Item = &'a MultiPolygon<f64>> + Clone, width: f64, margin: f64, wrap_antimeridian: bool) -> Option<Self> {
        let (raw_min, raw_max) = extent(shapes.clone(), false)?;
        let geographic = is_geographic(raw_min, raw_max);
        let wrap = wrap_antimeridian && geographic;
        let (min, max) = if wrap { extent(shapes, true)? } else { (raw_min, raw_max) };

        let x_factor = if geographic { ((min.y + max.y) / 2.0).to_radians().cos().max(0.1) } else { 1.0 };
        let span_x = (max.x - min.x) * x_factor;
        let span_y = max.y - min.y;
        if span_x <= 0.0 || span_y <= 0.0 { return None }

        let scale = (width - 2.0 * margin) / span_x;
        let height = span_y * scale + 2.0 * margin;
        Some(Self { min_x: min.x, max_y: max.y, x_factor, wrap, scale, margin, width, height })
    }

    pub fn width(&self) -> f64 { self.width }

    pub fn height(&self) -> f64 { self.height }

    /// Panel pixel position of `coord`, shifted down by `offset_y`.
    pub fn project(&self, coord: &Coord<f64>, offset_y: f64) -> (f64, f64) {
        let lon = if self.wrap { wrap_longitude(coord.x) } else { coord.x };
        let x = self.margin + (lon - self.min_x) * self.x_factor * self.scale;
        let y = offset_y + self.margin + (self.max_y - coord.y) * self.scale;
        (x, y)
    }
}
