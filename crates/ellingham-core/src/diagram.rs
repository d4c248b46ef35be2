// File: crates/ellingham-core/src/diagram.rs
// Summary: Diagram builder, autoscaling and drawing of one plot (with legend) into a canvas area.

use std::collections::BTreeSet;
use std::path::Path;

use skia_safe as skia;
use tracing::{debug, warn};

use crate::axis::Axis;
use crate::compound::{CompoundLine, LineStyle, PhaseState};
use crate::error::RenderError;
use crate::formula::pretty;
use crate::geometry::{Projection, RectI32};
use crate::grid::format_tick;
use crate::legend::{self, Layout, LegendEntry};
use crate::output;
use crate::table::CompoundTable;
use crate::text::{Anchor, TextShaper};
use crate::types::{
    Insets, ANNOTATION_SIZE, AXIS_LABEL_SIZE, HEIGHT, LEGEND_COLUMN_WIDTH, LINE_WIDTH, TICK_LABEL_SIZE, TICK_LEN,
    TITLE_SIZE, WIDTH,
};
use crate::Theme;

/// Fraction of each data span added around autoscaled bounds.
pub const AUTOSCALE_MARGIN: f64 = 0.05;
/// Pixels between a reaction label and the start of its line.
const ANNOTATION_GAP: f32 = 6.0;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// All text (title, ticks, legend labels). Off gives pixel-stable output across platforms.
    pub draw_labels: bool,
    pub draw_legend: bool,
    /// Reaction labels beside each line start.
    pub draw_annotations: bool,
    pub line_width: f32,
    pub legend_column_width: i32,
}

impl RenderOptions {
    /// The whole surface as a rectangle.
    pub fn bounds(&self) -> RectI32 {
        RectI32::from_ltwh(0, 0, self.width, self.height)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
            draw_legend: true,
            draw_annotations: false,
            line_width: LINE_WIDTH,
            legend_column_width: LEGEND_COLUMN_WIDTH,
        }
    }
}

pub struct Diagram {
    pub title: String,
    pub lines: Vec<CompoundLine>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Vertical reference gridlines at the temperature ticks.
    pub show_grid: bool,
}

impl Diagram {
    pub fn new() -> Self {
        Self {
            title: "Ellingham diagram".to_string(),
            lines: Vec::new(),
            x_axis: Axis::temperature(),
            y_axis: Axis::free_energy(),
            show_grid: true,
        }
    }

    /// One line per table entry, in table order, with autoscaled axes.
    pub fn build(table: &CompoundTable) -> Self {
        let mut diagram = Self::new();
        for line in table.lines() {
            diagram.add_line(line.clone());
        }
        diagram.autoscale_axes(AUTOSCALE_MARGIN);
        debug!(
            lines = diagram.lines.len(),
            x_min = diagram.x_axis.min,
            x_max = diagram.x_axis.max,
            y_min = diagram.y_axis.min,
            y_max = diagram.y_axis.max,
            "built diagram"
        );
        diagram
    }

    pub fn add_line(&mut self, line: CompoundLine) {
        self.lines.push(line);
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Fix the temperature range. Non-finite or empty ranges are ignored.
    pub fn with_x_bounds(mut self, min: f64, max: f64) -> Self {
        set_bounds(&mut self.x_axis, min, max);
        self
    }

    /// Fix the free-energy range. Non-finite or empty ranges are ignored.
    pub fn with_y_bounds(mut self, min: f64, max: f64) -> Self {
        set_bounds(&mut self.y_axis, min, max);
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Fit both axes to the data, always keeping T = 0 and ΔG = 0 in view.
    /// With no lines the axes keep their default ranges.
    pub fn autoscale_axes(&mut self, margin: f64) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for line in &self.lines {
            x_min = x_min.min(line.start().temperature);
            x_max = x_max.max(line.end().temperature);
            let (lo, hi) = line.energy_range();
            y_min = y_min.min(lo);
            y_max = y_max.max(hi);
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return;
        }
        let (x_min, x_max) = (x_min.min(0.0), x_max.max(0.0));
        let (y_min, y_max) = (y_min.min(0.0), y_max.max(0.0));
        let xm = (x_max - x_min).max(1.0) * margin;
        let ym = (y_max - y_min).max(1.0) * margin;
        self.x_axis.min = x_min - xm;
        self.x_axis.max = x_max + xm;
        self.y_axis.min = y_min - ym;
        self.y_axis.max = y_max + ym;
    }

    /// One entry per compound, styled like the compound's first segment.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| LegendEntry {
                label: line.label.clone(),
                style: line.style_for(&line.segments()[0], i),
            })
            .collect()
    }

    /// Distinct phase regimes across all lines.
    pub fn phase_states(&self) -> BTreeSet<PhaseState> {
        self.lines
            .iter()
            .flat_map(|l| l.segments().iter().map(|s| s.phase))
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

    /// Plot and legend rectangles inside `area`.
    pub fn layout_in(&self, area: RectI32, opts: &RenderOptions) -> Layout {
        let entries = if opts.draw_legend { self.lines.len() } else { 0 };
        let phase_key = opts.draw_legend && self.phase_states().len() > 1;
        legend::layout(area, opts, entries, phase_key)
    }

    /// Plot rectangle when the diagram fills the whole surface.
    pub fn plot_area(&self, opts: &RenderOptions) -> RectI32 {
        self.layout_in(opts.bounds(), opts).plot
    }

    /// Temperature axis widened on the cold side until every reaction label,
    /// right-aligned left of its line start, fits inside `plot`.
    pub fn annotation_axis(&self, plot: RectI32, text: &TextShaper) -> Axis {
        let width = plot.width() as f64;
        let max = self.x_axis.max;
        let mut min = self.x_axis.min;
        for line in &self.lines {
            let need = (text.measure_width(&pretty(&line.label), ANNOTATION_SIZE, false) + ANNOTATION_GAP + 2.0) as f64;
            let start = line.start().temperature;
            if need >= width || start >= max {
                continue;
            }
            // solve (start - min) / (max - min) * width >= need for min
            min = min.min((start * width - need * max) / (width - need));
        }
        Axis { min, ..self.x_axis.clone() }
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        canvas.clear(opts.theme.background);
        self.draw_in(canvas, opts.bounds(), opts);
    }

    /// Draw into `area` of an already cleared canvas; returns the plot rectangle.
    pub(crate) fn draw_in(&self, canvas: &skia::Canvas, area: RectI32, opts: &RenderOptions) -> RectI32 {
        let theme = &opts.theme;
        let layout = self.layout_in(area, opts);
        let text = opts.draw_labels.then(TextShaper::new);
        let x_axis = match (&text, opts.draw_annotations) {
            (Some(text), true) => self.annotation_axis(layout.plot, text),
            _ => self.x_axis.clone(),
        };
        let proj = Projection::new(layout.plot, &x_axis, &self.y_axis);

        if self.show_grid {
            draw_grid(canvas, layout.plot, &proj, &x_axis, theme);
        }
        draw_reference_lines(canvas, layout.plot, &proj, &x_axis, &self.y_axis, theme);

        canvas.save();
        canvas.clip_rect(layout.plot.to_skia(), None, true);
        for (i, line) in self.lines.iter().enumerate() {
            if line.end().temperature < x_axis.min || line.start().temperature > x_axis.max {
                warn!(label = %line.label, "compound line lies outside the temperature range");
            }
            draw_compound_line(canvas, &proj, line, i, opts.line_width);
        }
        if let (Some(text), true) = (&text, opts.draw_annotations) {
            draw_annotations(canvas, &proj, &self.lines, text, theme);
        }
        canvas.restore();

        draw_axes(canvas, layout.plot, &proj, &x_axis, &self.y_axis, theme, text.as_ref());
        if let Some(text) = &text {
            let x = (layout.plot.left + layout.plot.right) as f32 * 0.5;
            text.draw(canvas, &self.title, (x, layout.plot.top as f32 - TITLE_SIZE), Anchor::Center, TITLE_SIZE, theme.axis_label, false, true);
        }

        let entries = if opts.draw_legend { self.legend_entries() } else { Vec::new() };
        if layout.shown < entries.len() {
            warn!(
                shown = layout.shown,
                total = entries.len(),
                "legend does not fit; enlarge the image to list every compound"
            );
        }
        legend::draw(canvas, &layout, &entries[..layout.shown], opts, text.as_ref());
        layout.plot
    }
}

impl Default for Diagram {
    fn default() -> Self { Self::new() }
}

// ---- helpers ----------------------------------------------------------------

fn set_bounds(axis: &mut Axis, min: f64, max: f64) {
    if min.is_finite() && max.is_finite() && min < max {
        axis.min = min;
        axis.max = max;
    } else {
        warn!(axis = %axis.label, min, max, "ignoring invalid axis bounds");
    }
}

pub(crate) fn stroke_paint(style: &LineStyle, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(style.color);
    paint.set_alpha_f(style.alpha);
    if let Some(intervals) = style.dash.intervals(width) {
        paint.set_stroke_cap(skia::paint::Cap::Round);
        paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    paint
}

fn draw_grid(canvas: &skia::Canvas, plot: RectI32, proj: &Projection, x: &Axis, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals only
    for t in x.tick_values() {
        let px = proj.sx(t);
        canvas.draw_line((px, plot.top as f32), (px, plot.bottom as f32), &paint);
    }
}

fn draw_reference_lines(
    canvas: &skia::Canvas,
    plot: RectI32,
    proj: &Projection,
    x: &Axis,
    y: &Axis,
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.reference);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.2);

    if x.contains(0.0) {
        let px = proj.sx(0.0);
        canvas.draw_line((px, plot.top as f32), (px, plot.bottom as f32), &paint);
    }
    if y.contains(0.0) {
        let py = proj.sy(0.0);
        canvas.draw_line((plot.left as f32, py), (plot.right as f32, py), &paint);
    }
}

fn draw_compound_line(canvas: &skia::Canvas, proj: &Projection, line: &CompoundLine, index: usize, width: f32) {
    let mut marker = skia::Paint::default();
    marker.set_anti_alias(true);
    marker.set_style(skia::paint::Style::Fill);

    for segment in line.segments() {
        let style = line.style_for(segment, index);
        let stroke = stroke_paint(&style, width);
        let a = proj.point(segment.start.temperature, segment.start.energy);
        let b = proj.point(segment.end.temperature, segment.end.energy);
        canvas.draw_line(a, b, &stroke);

        marker.set_color(style.color);
        marker.set_alpha_f(style.alpha);
        canvas.draw_circle(a, width * 1.1, &marker);
        canvas.draw_circle(b, width * 1.1, &marker);
    }
}

fn draw_annotations(
    canvas: &skia::Canvas,
    proj: &Projection,
    lines: &[CompoundLine],
    text: &TextShaper,
    theme: &Theme,
) {
    for line in lines {
        let start = line.start();
        let x = proj.sx(start.temperature) - ANNOTATION_GAP;
        let y = proj.sy(start.energy + line.label_offset) + ANNOTATION_SIZE * 0.35;
        text.draw(canvas, &pretty(&line.label), (x, y), Anchor::Right, ANNOTATION_SIZE, theme.axis_label, false, false);
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    plot: RectI32,
    proj: &Projection,
    x: &Axis,
    y: &Axis,
    theme: &Theme,
    text: Option<&TextShaper>,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(1.2);
    canvas.draw_rect(plot.to_skia(), &axis_paint);

    let mut tick_paint = skia::Paint::default();
    tick_paint.set_color(theme.tick);
    tick_paint.set_anti_alias(true);
    tick_paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    let x_ticks = x.tick_values();
    let y_ticks = y.tick_values();
    let x_step = tick_step(&x_ticks);
    let y_step = tick_step(&y_ticks);

    for &v in &x_ticks {
        let px = proj.sx(v);
        canvas.draw_line((px, b), (px, b + TICK_LEN), &tick_paint);
        if let Some(text) = text {
            let label = format_tick(v, x_step);
            text.draw(canvas, &label, (px, b + TICK_LEN + 15.0), Anchor::Center, TICK_LABEL_SIZE, theme.tick, true, false);
        }
    }
    let mut widest = 0.0f32;
    for &v in &y_ticks {
        let py = proj.sy(v);
        canvas.draw_line((l - TICK_LEN, py), (l, py), &tick_paint);
        if let Some(text) = text {
            let label = format_tick(v, y_step);
            widest = widest.max(text.measure_width(&label, TICK_LABEL_SIZE, true));
            text.draw(canvas, &label, (l - TICK_LEN - 3.0, py + 4.0), Anchor::Right, TICK_LABEL_SIZE, theme.tick, true, false);
        }
    }

    // Labels
    if let Some(text) = text {
        let below = b + TICK_LEN + 15.0 + AXIS_LABEL_SIZE + 10.0;
        text.draw(canvas, &x.label, ((l + r) * 0.5, below), Anchor::Center, AXIS_LABEL_SIZE, theme.axis_label, false, false);
        // keep the rotated label clear of the widest tick label
        let lx = (l - TICK_LEN - widest - 8.0 - AXIS_LABEL_SIZE * 0.5).max(AXIS_LABEL_SIZE);
        text.draw_vertical(canvas, &y.label, lx, (t + b) * 0.5, AXIS_LABEL_SIZE, theme.axis_label);
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 1.0,
    }
}
