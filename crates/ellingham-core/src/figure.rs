// File: crates/ellingham-core/src/figure.rs
// Summary: Multi-panel figure (oxides beside the other families) with shared bounds and a sources note.

use std::path::Path;

use skia_safe as skia;
use tracing::debug;

use crate::compound::Family;
use crate::diagram::{Diagram, RenderOptions};
use crate::error::RenderError;
use crate::geometry::RectI32;
use crate::output;
use crate::table::CompoundTable;
use crate::text::{Anchor, TextShaper};
use crate::types::{ANNOTATION_SIZE, TITLE_SIZE};
use crate::Axis;

/// Default surface width for the two-panel figure.
pub const FIGURE_WIDTH: i32 = 2600;

const OXIDE_TITLE: &str = "Oxides";
const OTHERS_TITLE: &str = "Carbides, nitrides, fluorides and chlorides";
const TITLE_BAND: i32 = 36;
const NOTE_PAD: f32 = 8.0;

/// References for the bundled data set.
pub const BUNDLED_SOURCES: [&str; 6] = [
    "Sources",
    "Reed, T.B., 1971. Free energy of formation",
    "of binary compounds. MIT Press, Cambridge, Mass.",
    "Coltters, R.G., 1985. Thermodynamics of binary",
    "metallic carbides: A review. Materials Science",
    "and Engineering 76, 1–50.",
];

/// Panels laid out left to right on one surface.
pub struct Figure {
    pub title: Option<String>,
    pub panels: Vec<Diagram>,
    /// Note boxed in the lower-left corner of the last panel; first line bold.
    pub sources: Vec<String>,
}

impl Figure {
    pub fn new() -> Self {
        Self { title: None, panels: Vec::new(), sources: Vec::new() }
    }

    /// Oxides on the left, every other line on the right, both on the same
    /// bounds. Empty panels are left out; an empty table gives one empty panel.
    pub fn ellingham(table: &CompoundTable) -> Self {
        let (oxides, others) = table.split_by(|l| l.family == Some(Family::Oxide));
        let mut figure = Self::new().with_sources(BUNDLED_SOURCES);

        for (title, part, families) in [
            (OXIDE_TITLE, oxides, &[Family::Oxide][..]),
            (OTHERS_TITLE, others, &[Family::Carbide, Family::Nitride, Family::Fluoride, Family::Chloride][..]),
        ] {
            if part.is_empty() {
                continue;
            }
            let reactants: Vec<_> = families.iter().map(|f| f.reactant()).collect();
            let mut panel = Diagram::build(&part).with_title(title);
            let (min, max) = (panel.y_axis.min, panel.y_axis.max);
            panel.y_axis = Axis::free_energy_per(&reactants.join(", "));
            panel.y_axis.min = min;
            panel.y_axis.max = max;
            figure.add_panel(panel);
        }
        if figure.panels.is_empty() {
            figure.add_panel(Diagram::build(table));
        }
        figure.share_bounds();
        debug!(panels = figure.panels.len(), "built figure");
        figure
    }

    pub fn add_panel(&mut self, panel: Diagram) {
        self.panels.push(panel);
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_sources<S: ToString>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.sources = lines.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// Apply `f` to every panel, e.g. to fix bounds or hide the grid.
    pub fn map_panels(mut self, f: impl Fn(Diagram) -> Diagram) -> Self {
        self.panels = self.panels.into_iter().map(f).collect();
        self
    }

    /// Union of all panel bounds, applied to every panel.
    fn share_bounds(&mut self) {
        let Some(first) = self.panels.first() else { return };
        let (mut x, mut y) = ((first.x_axis.min, first.x_axis.max), (first.y_axis.min, first.y_axis.max));
        for p in &self.panels {
            x = (x.0.min(p.x_axis.min), x.1.max(p.x_axis.max));
            y = (y.0.min(p.y_axis.min), y.1.max(p.y_axis.max));
        }
        for p in &mut self.panels {
            p.x_axis.min = x.0;
            p.x_axis.max = x.1;
            p.y_axis.min = y.0;
            p.y_axis.max = y.1;
        }
    }

    /// Equal-width columns below the optional title band.
    pub fn panel_areas(&self, opts: &RenderOptions) -> Vec<RectI32> {
        let n = self.panels.len().max(1) as i32;
        let top = if self.title.is_some() { TITLE_BAND } else { 0 };
        let w = opts.width / n;
        (0..n)
            .map(|i| {
                let right = if i == n - 1 { opts.width } else { (i + 1) * w };
                RectI32::from_ltrb(i * w, top, right, opts.height)
            })
            .collect()
    }

    /// Render to `output_path`; the extension selects PNG, JPEG or SVG.
    pub fn render(&self, output_path: impl AsRef<Path>, opts: &RenderOptions) -> Result<(), RenderError> {
        output::write(output_path.as_ref(), opts, |canvas| self.draw(canvas, opts))
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        output::raster_bytes(opts, skia::EncodedImageFormat::PNG, "PNG", |canvas| self.draw(canvas, opts))
    }

    pub fn render_to_svg_bytes(&self, opts: &RenderOptions) -> Vec<u8> {
        output::svg_bytes(opts, |canvas| self.draw(canvas, opts))
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);
        let text = opts.draw_labels.then(TextShaper::new);

        let mut last_plot = None;
        for (panel, area) in self.panels.iter().zip(self.panel_areas(opts)) {
            last_plot = Some(panel.draw_in(canvas, area, opts));
        }

        let Some(text) = text else { return };
        if let Some(title) = &self.title {
            let y = (TITLE_BAND as f32 + TITLE_SIZE) * 0.5;
            text.draw(canvas, title, (opts.width as f32 * 0.5, y), Anchor::Center, TITLE_SIZE, theme.axis_label, false, true);
        }
        if let (Some(plot), false) = (last_plot, self.sources.is_empty()) {
            draw_note(canvas, plot, &self.sources, &text, opts);
        }
    }
}

impl Default for Figure {
    fn default() -> Self { Self::new() }
}

/// Boxed multi-line note in the lower-left corner of `plot`.
fn draw_note(canvas: &skia::Canvas, plot: RectI32, lines: &[String], text: &TextShaper, opts: &RenderOptions) {
    let theme = &opts.theme;
    let size = ANNOTATION_SIZE;
    let line_h = size * 1.35;
    let widest = lines
        .iter()
        .enumerate()
        .map(|(i, l)| text.measure_width(l, size, false) + if i == 0 { size } else { 0.0 })
        .fold(0.0f32, f32::max);
    let w = widest + 2.0 * NOTE_PAD;
    let h = lines.len() as f32 * line_h + 2.0 * NOTE_PAD;
    let left = plot.left as f32 + 10.0;
    let top = plot.bottom as f32 - 10.0 - h;
    let rect = skia::Rect::from_xywh(left, top, w, h);

    let mut fill = skia::Paint::default();
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(theme.legend_fill);
    canvas.draw_rect(rect, &fill);

    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.legend_border);
    canvas.draw_rect(rect, &border);

    for (i, line) in lines.iter().enumerate() {
        let y = top + NOTE_PAD + (i as f32 + 0.8) * line_h;
        text.draw(canvas, line, (left + NOTE_PAD, y), Anchor::Left, size, theme.axis_label, false, i == 0);
    }
}
