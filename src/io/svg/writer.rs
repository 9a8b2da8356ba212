//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use crate::error::Result;

/// Figure background (matplotlib "lightgray").
pub const BACKGROUND: &str = "#d3d3d3";

pub struct SvgWriter {
    writer: BufWriter<File>
}

/// String-based SVG writer.
#[derive(Default)]
pub struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self { writer: BufWriter::new(File::create(path)?) })
    }
}

impl SvgStringWriter {
    pub fn new() -> Self { Self::default() }

    /// Get the SVG string
    pub fn into_string(self) -> String {
        // Only &str / String content is ever written.
        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}

/// Write the XML declaration, opening <svg> tag and background.
pub fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"##)?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="{BACKGROUND}"/>"##)?;
    Ok(())
}

/// Write SVG styles for map features.
pub fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .state {{ stroke: #333333; stroke-width: 0.4; stroke-linejoin: round; fill-rule: evenodd; vector-effect: non-scaling-stroke; }}
    .title {{ font: 14px sans-serif; fill: #111111; text-anchor: middle; }}
    .legend {{ font: 10px sans-serif; fill: #111111; }}
    .swatch {{ stroke: #333333; stroke-width: 0.4; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write the closing </svg> tag.
pub fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}
