// File: crates/ellingham-core/src/legend.rs
// Summary: Plot/legend layout inside a drawing area and legend drawing (compound entries plus phase key).

use skia_safe as skia;

use crate::compound::{LineStyle, Phase, PhaseState};
use crate::diagram::{stroke_paint, RenderOptions};
use crate::formula::pretty;
use crate::geometry::{clamp, RectI32};
use crate::text::{Anchor, TextShaper};
use crate::types::{LEGEND_LABEL_SIZE, LEGEND_ROW_HEIGHT};

const PAD: i32 = 10;
const GAP: i32 = 16;
const SAMPLE_LEN: f32 = 28.0;
/// "Metal" header, phase names, then one row per compound phase.
const KEY_ROWS: i32 = 5;
const KEY_LABEL_W: i32 = 72;
const KEY_CELL_W: i32 = 50;
const MIN_ROW_HEIGHT: i32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub style: LineStyle,
}

/// Pixel rectangles for the plot area and the legend panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub plot: RectI32,
    pub legend: Option<RectI32>,
    pub columns: usize,
    pub rows_per_column: usize,
    pub row_height: i32,
    /// Leading entries that fit; the rest are left out.
    pub shown: usize,
    pub phase_key: bool,
}

/// Split `area` into plot and legend. No entries means no legend panel.
///
/// Rows shrink down to `MIN_ROW_HEIGHT` to keep the panel inside `area`;
/// below that the phase key goes first, then trailing entries.
pub fn layout(area: RectI32, opts: &RenderOptions, entries: usize, phase_key: bool) -> Layout {
    let left = area.left + opts.insets.left as i32;
    let top = area.top + opts.insets.top as i32;
    let right = area.right - opts.insets.right as i32;
    let bottom = (area.bottom - opts.insets.bottom as i32).max(top + 1);

    if entries == 0 {
        return Layout {
            plot: RectI32::from_ltrb(left, top, right.max(left + 1), bottom),
            legend: None,
            columns: 0,
            rows_per_column: 0,
            row_height: LEGEND_ROW_HEIGHT,
            shown: 0,
            phase_key: false,
        };
    }

    let col_w = column_width(opts);
    let avail = (bottom - top - 2 * PAD).max(MIN_ROW_HEIGHT);
    let key_rows = |on: bool| if on { KEY_ROWS } else { 0 };
    let key_pad = |on: bool| if on { PAD } else { 0 };

    let fit = ((avail - key_rows(phase_key) * LEGEND_ROW_HEIGHT - key_pad(phase_key)) / LEGEND_ROW_HEIGHT).max(1) as usize;
    let max_cols = ((area.width() / 2) / col_w).max(1) as usize;
    let columns = clamp(entries.div_ceil(fit), 1, max_cols);
    let mut rows = entries.div_ceil(columns);
    let mut phase_key = phase_key;

    let mut row_h = ((avail - key_pad(phase_key)) / (rows as i32 + key_rows(phase_key))).min(LEGEND_ROW_HEIGHT);
    if row_h < MIN_ROW_HEIGHT {
        row_h = MIN_ROW_HEIGHT;
        phase_key = false;
        rows = rows.min((avail / row_h).max(1) as usize);
    }
    let shown = entries.min(rows * columns);

    let key_h = if phase_key { KEY_ROWS * row_h + PAD } else { 0 };
    let legend_w = columns as i32 * col_w + 2 * PAD;
    let legend_h = rows as i32 * row_h + 2 * PAD + key_h;
    let legend_left = right - legend_w;

    Layout {
        plot: RectI32::from_ltrb(left, top, (legend_left - GAP).max(left + 1), bottom),
        legend: Some(RectI32::from_ltwh(legend_left, top, legend_w, legend_h)),
        columns,
        rows_per_column: rows,
        row_height: row_h,
        shown,
        phase_key,
    }
}

fn column_width(opts: &RenderOptions) -> i32 {
    opts.legend_column_width.max(KEY_LABEL_W + 3 * KEY_CELL_W)
}

pub fn draw(
    canvas: &skia::Canvas,
    layout: &Layout,
    entries: &[LegendEntry],
    opts: &RenderOptions,
    text: Option<&TextShaper>,
) {
    let Some(rect) = layout.legend else { return };
    let theme = &opts.theme;

    let mut fill = skia::Paint::default();
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(theme.legend_fill);
    canvas.draw_rect(rect.to_skia(), &fill);

    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.legend_border);
    canvas.draw_rect(rect.to_skia(), &border);

    let col_w = column_width(opts);
    let rows = layout.rows_per_column.max(1);
    let row_h = layout.row_height;
    let size = label_size(row_h);
    for (i, entry) in entries.iter().take(layout.shown).enumerate() {
        let (col, row) = (i / rows, i % rows);
        let x = (rect.left + PAD + col as i32 * col_w) as f32;
        let y = (rect.top + PAD + row as i32 * row_h) as f32 + row_h as f32 * 0.5;
        let paint = stroke_paint(&entry.style, opts.line_width);
        canvas.draw_line((x, y), (x + SAMPLE_LEN, y), &paint);
        if let Some(text) = text {
            text.draw_left(canvas, &pretty(&entry.label), x + SAMPLE_LEN + 8.0, y + size * 0.375, size, theme.axis_label, false);
        }
    }

    if layout.phase_key {
        let top = rect.top + PAD + rows as i32 * row_h + PAD;
        draw_phase_key(canvas, rect.left + PAD, top, row_h, opts, text);
    }
}

/// Grid of line samples: columns are metal phases, rows are compound phases.
fn draw_phase_key(
    canvas: &skia::Canvas,
    left: i32,
    top: i32,
    row_h: i32,
    opts: &RenderOptions,
    text: Option<&TextShaper>,
) {
    let theme = &opts.theme;
    let size = label_size(row_h);
    let row_h = row_h as f32;
    let cell_x = |c: usize| (left + KEY_LABEL_W + c as i32 * KEY_CELL_W) as f32;
    let row_y = |r: i32| top as f32 + r as f32 * row_h + row_h * 0.5;

    if let Some(text) = text {
        let mid = cell_x(0) + 1.5 * KEY_CELL_W as f32;
        text.draw(canvas, "Metal", (mid, row_y(0) + size * 0.375), Anchor::Center, size, theme.axis_label, false, true);
        text.draw(canvas, "Compound", (left as f32, row_y(1) + size * 0.375), Anchor::Left, size, theme.axis_label, false, true);
        for (c, phase) in Phase::ALL.iter().enumerate() {
            let x = cell_x(c) + 0.5 * KEY_CELL_W as f32;
            text.draw(canvas, phase.name(), (x, row_y(1) + size * 0.375), Anchor::Center, size - 1.0, theme.axis_label, false, false);
        }
    }

    for (r, compound) in Phase::ALL.iter().enumerate() {
        let y = row_y(2 + r as i32);
        if let Some(text) = text {
            let x = (left + KEY_LABEL_W - 6) as f32;
            text.draw(canvas, compound.name(), (x, y + size * 0.375), Anchor::Right, size - 1.0, theme.axis_label, false, false);
        }
        for (c, metal) in Phase::ALL.iter().enumerate() {
            let phase = PhaseState::new(*metal, *compound);
            let style = LineStyle { color: theme.axis_line, dash: phase.dash(), alpha: phase.alpha() };
            let paint = stroke_paint(&style, opts.line_width);
            let x = cell_x(c);
            canvas.draw_line((x + 6.0, y), (x + KEY_CELL_W as f32 - 6.0, y), &paint);
        }
    }
}

/// Label size for a row height; full size at the default row height.
fn label_size(row_h: i32) -> f32 {
    LEGEND_LABEL_SIZE * (row_h as f32 / LEGEND_ROW_HEIGHT as f32).min(1.0)
}
