// File: crates/ellingham-core/src/compound.rs
// Summary: Compound line model: points, phase regimes, families and style hints.
// Notes:
// - Temperatures are degrees Celsius, energies kJ per mole of reactant gas
//   (per mole of carbon for carbides). Unit conversion happens in `table`.
// - A `CompoundLine` always holds at least one segment; segments stay sorted
//   by start temperature.

use skia_safe as skia;

/// A coordinate in (temperature, free energy) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub temperature: f64,
    pub energy: f64,
}

impl Point {
    pub const fn new(temperature: f64, energy: f64) -> Self {
        Self { temperature, energy }
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.energy.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    #[default]
    Solid,
    Liquid,
    Gas,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Solid, Phase::Liquid, Phase::Gas];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "s" | "solid" => Some(Phase::Solid),
            "l" | "liquid" => Some(Phase::Liquid),
            "g" | "gas" => Some(Phase::Gas),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Solid => "Solid",
            Phase::Liquid => "Liquid",
            Phase::Gas => "Gas",
        }
    }
}

/// Phase regime of a segment: state of the metal and of the compound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseState {
    pub metal: Phase,
    pub compound: Phase,
}

impl PhaseState {
    pub const SOLID: Self = Self { metal: Phase::Solid, compound: Phase::Solid };

    pub const fn new(metal: Phase, compound: Phase) -> Self {
        Self { metal, compound }
    }

    /// Dash pattern encodes the metal phase.
    pub fn dash(&self) -> Dash {
        match self.metal {
            Phase::Solid => Dash::Solid,
            Phase::Liquid => Dash::Dashed,
            Phase::Gas => Dash::Dotted,
        }
    }

    /// Opacity encodes the compound phase.
    pub fn alpha(&self) -> f32 {
        match self.compound {
            Phase::Solid => 1.0,
            Phase::Liquid => 0.6,
            Phase::Gas => 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl Dash {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "solid" | "-" => Some(Dash::Solid),
            "dashed" | "--" => Some(Dash::Dashed),
            "dotted" | ":" => Some(Dash::Dotted),
            _ => None,
        }
    }

    /// On/off intervals in pixels for a stroke of `width`; `None` for a solid stroke.
    pub fn intervals(&self, width: f32) -> Option<[f32; 2]> {
        let w = width.max(1.0);
        match self {
            Dash::Solid => None,
            Dash::Dashed => Some([3.7 * w, 1.6 * w]),
            Dash::Dotted => Some([1.0 * w, 1.65 * w]),
        }
    }
}

/// Chemical family; decides the default line colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Oxide,
    Carbide,
    Nitride,
    Fluoride,
    Chloride,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Oxide,
        Family::Carbide,
        Family::Nitride,
        Family::Fluoride,
        Family::Chloride,
    ];

    /// Accepts singular or plural names, any case.
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.trim().to_ascii_lowercase();
        let n = n.strip_suffix('s').unwrap_or(&n);
        Self::ALL.into_iter().find(|f| f.name() == n)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Family::Oxide => "oxide",
            Family::Carbide => "carbide",
            Family::Nitride => "nitride",
            Family::Fluoride => "fluoride",
            Family::Chloride => "chloride",
        }
    }

    /// Gas (or carbon) the formation energy is normalised to.
    pub fn reactant(&self) -> &'static str {
        match self {
            Family::Oxide => "O₂",
            Family::Carbide => "C",
            Family::Nitride => "N₂",
            Family::Fluoride => "F₂",
            Family::Chloride => "Cl₂",
        }
    }

    pub fn color(&self) -> skia::Color {
        match self {
            Family::Oxide => skia::Color::from_rgb(255, 0, 0),
            Family::Carbide => skia::Color::from_rgb(102, 102, 102),
            Family::Nitride => skia::Color::from_rgb(0, 0, 255),
            Family::Fluoride => skia::Color::from_rgb(0, 255, 0),
            Family::Chloride => skia::Color::from_rgb(0, 128, 0),
        }
    }
}

/// Colour cycle for lines without a family or explicit colour.
pub const PALETTE: [skia::Color; 10] = [
    skia::Color::new(0xff1f77b4),
    skia::Color::new(0xffff7f0e),
    skia::Color::new(0xff2ca02c),
    skia::Color::new(0xffd62728),
    skia::Color::new(0xff9467bd),
    skia::Color::new(0xff8c564b),
    skia::Color::new(0xffe377c2),
    skia::Color::new(0xff7f7f7f),
    skia::Color::new(0xffbcbd22),
    skia::Color::new(0xff17becf),
];

/// Optional per-line display hint; unset parts fall back to family and phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleHint {
    pub color: Option<skia::Color>,
    pub dash: Option<Dash>,
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<skia::Color> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(skia::Color::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Fully resolved stroke style for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: skia::Color,
    pub dash: Dash,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub phase: PhaseState,
}

impl Segment {
    pub fn new(start: Point, end: Point, phase: PhaseState) -> Self {
        Self { start, end, phase }
    }

    /// Finite endpoints, drawn strictly left to right.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start.temperature < self.end.temperature
    }
}

/// One compound's formation-energy trend.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundLine {
    pub label: String,
    pub family: Option<Family>,
    pub style: Option<StyleHint>,
    /// Vertical nudge of the reaction annotation, in energy units.
    pub label_offset: f64,
    segments: Vec<Segment>,
}

impl CompoundLine {
    /// Single solid/solid segment from `start` to `end`.
    pub fn new(label: impl Into<String>, start: Point, end: Point) -> Self {
        Self::from_segment(label, Segment::new(start, end, PhaseState::SOLID))
    }

    pub fn from_segment(label: impl Into<String>, segment: Segment) -> Self {
        Self {
            label: label.into(),
            family: None,
            style: None,
            label_offset: 0.0,
            segments: vec![segment],
        }
    }

    pub fn with_family(mut self, family: Family) -> Self {
        self.family = Some(family);
        self
    }

    pub fn with_style(mut self, style: StyleHint) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    /// Add a segment for another phase regime, keeping segments ordered.
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.push_segment(segment);
        self
    }

    pub(crate) fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.segments
            .sort_by(|a, b| a.start.temperature.total_cmp(&b.start.temperature));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn start(&self) -> Point {
        self.segments[0].start
    }

    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end
    }

    pub fn is_valid_span(&self) -> bool {
        self.segments.iter().all(Segment::is_valid)
            && self.start().temperature < self.end().temperature
    }

    pub fn has_phase(&self, phase: PhaseState) -> bool {
        self.segments.iter().any(|s| s.phase == phase)
    }

    /// Base colour: explicit hint, then family, then the palette by draw index.
    pub fn color(&self, index: usize) -> skia::Color {
        self.style
            .and_then(|s| s.color)
            .or_else(|| self.family.map(|f| f.color()))
            .unwrap_or(PALETTE[index % PALETTE.len()])
    }

    pub fn style_for(&self, segment: &Segment, index: usize) -> LineStyle {
        LineStyle {
            color: self.color(index),
            dash: self.style.and_then(|s| s.dash).unwrap_or_else(|| segment.phase.dash()),
            alpha: segment.phase.alpha(),
        }
    }

    /// (min, max) energy over all segment endpoints.
    pub fn energy_range(&self) -> (f64, f64) {
        self.segments.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (
                lo.min(s.start.energy).min(s.end.energy),
                hi.max(s.start.energy).max(s.end.energy),
            )
        })
    }
}
