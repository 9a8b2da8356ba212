use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile as shp;

/// Closed ring of `geo` coordinates from shapefile points.
fn ring_to_linestring(points: &[shp::Point]) -> LineString<f64> {
    let mut coords = points.iter()
        .map(|pt| Coord { x: pt.x, y: pt.y })
        .collect::<Vec<_>>();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last { coords.push(first) }
    }
    LineString(coords)
}

/// Convert a shapefile polygon to `geo::MultiPolygon<f64>`.
///
/// Shapefiles list each outer ring followed by its holes, so every inner ring
/// is attached to the most recent outer ring. Inner rings seen before any
/// outer ring are dropped.
pub(crate) fn shp_to_geo(polygon: &shp::Polygon) -> MultiPolygon<f64> {
    let mut polys = Vec::new();
    let mut current: Option<(LineString<f64>, Vec<LineString<f64>>)> = None;

    for ring in polygon.rings() {
        match ring {
            shp::PolygonRing::Outer(points) => {
                if let Some((exterior, holes)) = current.take() {
                    polys.push(Polygon::new(exterior, holes));
                }
                current = Some((ring_to_linestring(points), Vec::new()));
            }
            shp::PolygonRing::Inner(points) => {
                if let Some((_, holes)) = current.as_mut() {
                    holes.push(ring_to_linestring(points));
                }
            }
        }
    }
    if let Some((exterior, holes)) = current {
        polys.push(Polygon::new(exterior, holes));
    }

    MultiPolygon(polys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> shp::Point { shp::Point { x, y } }

    /// Clockwise square (shapefile outer ring orientation).
    fn square(x0: f64, y0: f64, size: f64) -> Vec<shp::Point> {
        vec![pt(x0, y0), pt(x0, y0 + size), pt(x0 + size, y0 + size), pt(x0 + size, y0), pt(x0, y0)]
    }

    #[test]
    fn outer_rings_become_separate_polygons() {
        let polygon = shp::Polygon::with_rings(vec![
            shp::PolygonRing::Outer(square(0.0, 0.0, 1.0)),
            shp::PolygonRing::Outer(square(5.0, 5.0, 2.0)),
        ]);
        let mp = shp_to_geo(&polygon);
        assert_eq!(mp.0.len(), 2);
        assert!(mp.0.iter().all(|p| p.interiors().is_empty()));
    }

    #[test]
    fn inner_ring_attaches_to_outer() {
        let mut hole = square(1.0, 1.0, 1.0);
        hole.reverse();
        let polygon = shp::Polygon::with_rings(vec![
            shp::PolygonRing::Outer(square(0.0, 0.0, 4.0)),
            shp::PolygonRing::Inner(hole),
        ]);
        let mp = shp_to_geo(&polygon);
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn rings_are_closed() {
        let ring = ring_to_linestring(&[pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0)]);
        assert_eq!(ring.0.first(), ring.0.last());
        assert_eq!(ring.0.len(), 4);
    }
}
