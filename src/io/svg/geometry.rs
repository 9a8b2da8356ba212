//! Geometry encoding for SVG paths.

use std::io::Write;

use geo::{Coord, CoordsIter, LineString, MultiPolygon};

use crate::error::Result;

use super::Rgb;

/// Projection function: lon/lat -> SVG coords (x,y)
pub type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Escape text for use in SVG element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();
    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), project, &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, project, &mut out);
        }
    }
    out
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z"
fn ring_to_path(ring: &LineString<f64>, project: &Projection, out: &mut String) {
    let mut coords = ring.coords_iter().map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.2},{y:.2}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.2},{y:.2}"));
        }
        out.push('Z');
    }
}

/// Draw one filled shape with a hover title.
pub fn draw_filled_shape(writer: &mut impl Write, shape: &MultiPolygon<f64>, fill: Rgb, title: &str, project: &Projection) -> Result<()> {
    let path = multipolygon_to_path(shape, project);
    if path.is_empty() { return Ok(()) }
    writeln!(writer, r#"<path class="state" d="{path}" fill="{fill}"><title>{}</title></path>"#, escape_xml(title))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Polygon};

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"A & "B" <C>"#), "A &amp; &quot;B&quot; &lt;C&gt;");
    }

    #[test]
    fn path_has_one_subpath_per_ring() {
        let outer: Polygon<f64> = polygon![
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0)]],
        ];
        let shape = MultiPolygon(vec![outer]);
        let identity = |c: &Coord<f64>| (c.x, c.y);
        let path = multipolygon_to_path(&shape, &identity);
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('Z').count(), 2);
        assert!(path.starts_with(" M0.00,0.00 L4.00,0.00"));
    }

    #[test]
    fn filled_shape_carries_fill_and_title() {
        let shape = MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let identity = |c: &Coord<f64>| (c.x, c.y);
        let mut out = Vec::new();
        draw_filled_shape(&mut out, &shape, Rgb::hex(0xfd8d3c), "Texas & Co", &identity).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains(r##"fill="#fd8d3c""##));
        assert!(svg.contains("<title>Texas &amp; Co</title>"));
    }
}
