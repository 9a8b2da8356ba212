//! Choropleth figures: stacked map panels in one SVG document.

use std::{io::Write, path::{Path, PathBuf}};

use log::info;

use crate::{
    config::{RenderConfig, Variant},
    error::{Error, Result},
    io::svg::{self, Ramp, Rgb, SvgStringWriter, SvgWriter, BU_RD, NO_DATA, YL_OR_RD},
    metrics::StateMetrics,
};

use super::{Classification, MappedState, PanelProjection, Scheme};

const TITLE_BAND: f64 = 28.0;
const LEGEND_BAND: f64 = 30.0;
const SWATCH: f64 = 12.0;

/// Metric column drawn by a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    VoteWeight,
    VoteDelta,
}

impl Column {
    pub fn value(self, row: &StateMetrics) -> Option<f64> {
        match self {
            Self::VoteWeight => Some(row.vote_weight),
            Self::VoteDelta => row.vote_delta,
        }
    }
}

/// One map panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub title: String,
    pub column: Column,
    pub scheme: Scheme,
}

impl Panel {
    fn new(title: &str, column: Column, scheme: Scheme) -> Self {
        Self { title: title.to_string(), column, scheme }
    }

    fn ramp(&self) -> Ramp {
        match self.scheme {
            Scheme::Diverging => BU_RD,
            _ => YL_OR_RD,
        }
    }
}

/// A set of panels written to one SVG file named `<name>.svg`.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub name: String,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn file_name(&self) -> String { format!("{}.svg", self.name) }
}

/// Figures drawn for a variant: the weight figure always, plus the delta
/// figure when fair allocation was computed.
pub fn figures_for(variant: Variant, classes: usize) -> Vec<Figure> {
    let straight = Panel::new("Voter Weight (Straight)", Column::VoteWeight, Scheme::EqualInterval { classes });
    let quantile = Panel::new("Voter Weight (Quantile)", Column::VoteWeight, Scheme::Quantiles { classes });

    let mut figures = vec![Figure { name: "vote_weight".to_string(), panels: vec![straight.clone(), quantile.clone()] }];
    if variant == Variant::Delta {
        figures.push(Figure {
            name: "vote_delta".to_string(),
            panels: vec![straight, quantile, Panel::new("Vote Delta (Actual - Fair)", Column::VoteDelta, Scheme::Diverging)],
        });
    }
    figures
}

/// Fill color of every state for one panel, plus the legend entries.
fn panel_fills(panel: &Panel, states: &[MappedState]) -> (Vec<Rgb>, Vec<(Rgb, String)>) {
    let values = states.iter().map(|s| panel.column.value(&s.metrics)).collect::<Vec<_>>();
    let present = values.iter().flatten().copied().collect::<Vec<_>>();
    let ramp = panel.ramp();

    if panel.scheme == Scheme::Diverging {
        let max_abs = present.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let fills = values.iter().map(|v| v.map_or(NO_DATA, |v| ramp.diverging(v, max_abs))).collect();
        let legend = [-max_abs, 0.0, max_abs].into_iter()
            .map(|v| (ramp.diverging(v, max_abs), format_value(v)))
            .collect();
        return (fills, legend);
    }

    let Some(classes) = Classification::for_scheme(panel.scheme, &present) else {
        return (vec![NO_DATA; states.len()], Vec::new());
    };
    let fills = values.iter()
        .map(|v| v.map_or(NO_DATA, |v| ramp.class_color(classes.class_of(v), classes.len())))
        .collect();
    let legend = classes.ranges().enumerate()
        .map(|(i, (lo, hi))| (ramp.class_color(i, classes.len()), format!("{}-{}", format_value(lo), format_value(hi))))
        .collect();
    (fills, legend)
}

/// Compact label: scientific notation for per-capita magnitudes.
fn format_value(v: f64) -> String {
    if v != 0.0 && v.abs() < 0.01 { format!("{v:.2e}") } else { format!("{v:.2}") }
}

fn write_legend(writer: &mut impl Write, entries: &[(Rgb, String)], y: f64, width: f64) -> Result<()> {
    if entries.is_empty() { return Ok(()) }
    let slot = width / entries.len() as f64;
    for (i, (color, label)) in entries.iter().enumerate() {
        let x = i as f64 * slot + 8.0;
        writeln!(writer, r#"<rect class="swatch" x="{x:.1}" y="{y:.1}" width="{SWATCH}" height="{SWATCH}" fill="{color}"/>"#)?;
        writeln!(writer, r#"<text class="legend" x="{:.1}" y="{:.1}">{}</text>"#, x + SWATCH + 4.0, y + SWATCH - 2.0, svg::escape_xml(label))?;
    }
    Ok(())
}

/// Write a complete figure document.
pub fn render_figure<W: Write>(writer: &mut W, figure: &Figure, states: &[MappedState], config: &RenderConfig) -> Result<()> {
    if states.is_empty() {
        return Err(Error::JoinMismatch { message: format!("no states to draw in figure {:?}", figure.name) });
    }
    let proj = PanelProjection::fit(states.iter().map(|s| &s.shape), config.width, config.margin, config.wrap_antimeridian)
        .ok_or_else(|| Error::schema("state boundaries", "boundaries have no drawable extent"))?;

    let panel_height = TITLE_BAND + proj.height() + LEGEND_BAND;
    svg::write_svg_header(writer, proj.width(), panel_height * figure.panels.len() as f64)?;
    svg::write_svg_styles(writer)?;

    for (i, panel) in figure.panels.iter().enumerate() {
        let top = i as f64 * panel_height;
        let map_top = top + TITLE_BAND;
        let project = move |c: &geo::Coord<f64>| proj.project(c, map_top);
        let (fills, legend) = panel_fills(panel, states);

        writeln!(writer, r#"<g class="panel">"#)?;
        writeln!(writer, r#"<text class="title" x="{:.1}" y="{:.1}">{}</text>"#, proj.width() / 2.0, top + 19.0, svg::escape_xml(&panel.title))?;
        for (state, fill) in states.iter().zip(fills) {
            let title = match panel.column.value(&state.metrics) {
                Some(v) => format!("{}: {}", state.name(), format_value(v)),
                None => state.name().to_string(),
            };
            svg::draw_filled_shape(writer, &state.shape, fill, &title, &project)?;
        }
        write_legend(writer, &legend, map_top + proj.height() + 8.0, proj.width())?;
        writeln!(writer, "</g>")?;
    }

    svg::write_svg_footer(writer)?;
    Ok(())
}

/// Render a figure into an SVG string.
pub fn render_figure_to_string(figure: &Figure, states: &[MappedState], config: &RenderConfig) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    render_figure(&mut writer, figure, states, config)?;
    Ok(writer.into_string())
}

/// Write an already rendered figure to `<dir>/<name>.svg`.
pub(crate) fn write_figure(dir: &Path, figure: &Figure, document: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(figure.file_name());
    let mut writer = SvgWriter::new(&path)?;
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    info!("[map] wrote {} ({} panels)", path.display(), figure.panels.len());
    Ok(path)
}

/// Render a figure to `<dir>/<name>.svg` and return the path. Nothing is
/// created when rendering fails.
pub fn render_figure_to_file(dir: &Path, figure: &Figure, states: &[MappedState], config: &RenderConfig) -> Result<PathBuf> {
    let document = render_figure_to_string(figure, states, config)?;
    write_figure(dir, figure, &document)
}
