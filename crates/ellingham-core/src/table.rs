// File: crates/ellingham-core/src/table.rs
// Summary: Validated compound table; CSV loading with unit conversion and phase-segment merging.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::compound::{parse_hex_color, CompoundLine, Dash, Family, Phase, PhaseState, Point, Segment, StyleHint};
use crate::error::TableError;

/// Table shipped with the crate (Reed 1971; Coltters 1985).
const BUNDLED_CSV: &str = include_str!("../data/ellingham.csv");

/// Kelvin to degrees Celsius offset.
pub const KELVIN_OFFSET: f64 = 273.15;
/// Kilojoules per thermochemical kilocalorie.
pub const KJ_PER_KCAL: f64 = 4.184;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "c" | "°c" | "celsius" => Some(Self::Celsius),
            "k" | "kelvin" => Some(Self::Kelvin),
            _ => None,
        }
    }

    pub fn to_celsius(&self, t: f64) -> f64 {
        match self {
            Self::Celsius => t,
            Self::Kelvin => t - KELVIN_OFFSET,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnergyUnit {
    #[default]
    KiloJoule,
    KiloCalorie,
}

impl EnergyUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kj" => Some(Self::KiloJoule),
            "kcal" => Some(Self::KiloCalorie),
            _ => None,
        }
    }

    pub fn to_kj(&self, g: f64) -> f64 {
        match self {
            Self::KiloJoule => g,
            Self::KiloCalorie => g * KJ_PER_KCAL,
        }
    }
}

/// Immutable, validated list of compound lines in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundTable {
    lines: Vec<CompoundLine>,
}

impl CompoundTable {
    /// Validate an explicit table.
    /// Contract: every span runs left to right and labels are unique.
    pub fn new(lines: Vec<CompoundLine>) -> Result<Self, TableError> {
        {
            let mut seen = HashSet::new();
            for line in &lines {
                if !line.is_valid_span() {
                    return Err(TableError::InvalidSpan { label: line.label.clone() });
                }
                if !seen.insert(line.label.as_str()) {
                    return Err(TableError::DuplicateLabel { label: line.label.clone() });
                }
            }
        }
        Ok(Self { lines })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled oxide, carbide, nitride, fluoride and chloride data.
    pub fn bundled() -> Result<Self, TableError> {
        Self::from_reader(BUNDLED_CSV.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), lines = table.len(), "loaded compound table");
        Ok(table)
    }

    /// Parse CSV rows; rows sharing a reaction label merge into one line.
    pub fn from_reader(reader: impl Read) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect::<Vec<_>>();
        let columns = Columns::locate(&headers)?;

        let mut lines: Vec<CompoundLine> = Vec::new();
        let mut by_label: HashMap<String, usize> = HashMap::new();

        for (i, rec) in rdr.records().enumerate() {
            let rec = rec?;
            let row = columns.parse(&rec, i + 1)?;
            match by_label.get(&row.label) {
                Some(&idx) => {
                    let line = &mut lines[idx];
                    if line.has_phase(row.segment.phase) {
                        return Err(TableError::DuplicateLabel { label: row.label });
                    }
                    if !row.segment.is_valid() {
                        return Err(TableError::InvalidSpan { label: row.label });
                    }
                    line.push_segment(row.segment);
                }
                None => {
                    let mut line = CompoundLine::from_segment(row.label.clone(), row.segment)
                        .with_label_offset(row.label_offset);
                    line.family = row.family;
                    line.style = row.style;
                    by_label.insert(row.label, lines.len());
                    lines.push(line);
                }
            }
        }

        Self::new(lines)
    }

    /// Keep only lines whose family is listed; an empty list keeps everything.
    pub fn filter_families(&self, families: &[Family]) -> Self {
        if families.is_empty() {
            return self.clone();
        }
        let lines = self
            .lines
            .iter()
            .filter(|l| l.family.is_some_and(|f| families.contains(&f)))
            .cloned()
            .collect();
        Self { lines }
    }

    /// Split into (matching, rest), keeping table order in both.
    pub fn split_by(&self, pred: impl Fn(&CompoundLine) -> bool) -> (Self, Self) {
        let (yes, no): (Vec<_>, Vec<_>) = self.lines.iter().cloned().partition(|l| pred(l));
        (Self { lines: yes }, Self { lines: no })
    }

    pub fn lines(&self) -> &[CompoundLine] {
        &self.lines
    }

    pub fn get(&self, label: &str) -> Option<&CompoundLine> {
        self.lines.iter().find(|l| l.label == label)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ---- CSV helpers ------------------------------------------------------------

struct Row {
    label: String,
    family: Option<Family>,
    style: Option<StyleHint>,
    label_offset: f64,
    segment: Segment,
}

/// Header indices; optional columns are `None` when absent.
struct Columns {
    label: usize,
    t0: usize,
    t1: usize,
    g0: usize,
    g1: usize,
    family: Option<usize>,
    metal_phase: Option<usize>,
    compound_phase: Option<usize>,
    temp_unit: Option<usize>,
    energy_unit: Option<usize>,
    label_offset: Option<usize>,
    color: Option<usize>,
    dash: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, TableError> {
        let idx = |names: &[&str]| -> Option<usize> {
            headers.iter().position(|h| names.contains(&h.as_str()))
        };
        let required = |name: &'static str, aliases: &[&str]| -> Result<usize, TableError> {
            idx(aliases).ok_or(TableError::MissingColumn(name))
        };

        Ok(Self {
            label: required("reaction", &["reaction", "label"])?,
            t0: required("t0", &["t0"])?,
            t1: required("t1", &["t1"])?,
            g0: required("g0", &["g0"])?,
            g1: required("g1", &["g1"])?,
            family: idx(&["family"]),
            metal_phase: idx(&["metal_phase", "metal"]),
            compound_phase: idx(&["compound_phase"]),
            temp_unit: idx(&["temp_unit"]),
            energy_unit: idx(&["energy_unit"]),
            label_offset: idx(&["label_offset"]),
            color: idx(&["color", "colour"]),
            dash: idx(&["dash"]),
        })
    }

    fn parse(&self, rec: &csv::StringRecord, record: usize) -> Result<Row, TableError> {
        // Absent column and empty cell are treated alike.
        let text = |ix: Option<usize>| -> Option<&str> {
            ix.and_then(|i| rec.get(i)).filter(|s| !s.is_empty())
        };
        let number = |ix: usize, column: &'static str| -> Result<f64, TableError> {
            let raw = rec.get(ix).unwrap_or("");
            raw.parse::<f64>().map_err(|_| TableError::InvalidNumber {
                record,
                column,
                value: raw.to_string(),
            })
        };
        fn lookup<T>(
            value: Option<&str>,
            what: &'static str,
            record: usize,
            f: impl Fn(&str) -> Option<T>,
        ) -> Result<Option<T>, TableError> {
            value
                .map(|v| {
                    f(v).ok_or_else(|| TableError::InvalidValue {
                        record,
                        what,
                        value: v.to_string(),
                    })
                })
                .transpose()
        }

        let label = rec.get(self.label).unwrap_or("").to_string();
        if label.is_empty() {
            return Err(TableError::InvalidValue { record, what: "reaction label", value: label });
        }

        let temp_unit = lookup(text(self.temp_unit), "temperature unit", record, TemperatureUnit::from_name)?
            .unwrap_or_default();
        let energy_unit = lookup(text(self.energy_unit), "energy unit", record, EnergyUnit::from_name)?
            .unwrap_or_default();
        let metal = lookup(text(self.metal_phase), "metal phase", record, Phase::from_name)?.unwrap_or_default();
        let compound =
            lookup(text(self.compound_phase), "compound phase", record, Phase::from_name)?.unwrap_or_default();
        let family = lookup(text(self.family), "family", record, Family::from_name)?;
        let color = lookup(text(self.color), "colour", record, parse_hex_color)?;
        let dash = lookup(text(self.dash), "dash style", record, Dash::from_name)?;
        let label_offset = match self.label_offset {
            Some(ix) if text(Some(ix)).is_some() => number(ix, "label_offset")?,
            _ => 0.0,
        };

        let start = Point::new(
            temp_unit.to_celsius(number(self.t0, "t0")?),
            energy_unit.to_kj(number(self.g0, "g0")?),
        );
        let end = Point::new(
            temp_unit.to_celsius(number(self.t1, "t1")?),
            energy_unit.to_kj(number(self.g1, "g1")?),
        );

        let style = (color.is_some() || dash.is_some()).then_some(StyleHint { color, dash });

        Ok(Row {
            label,
            family,
            style,
            label_offset,
            segment: Segment::new(start, end, PhaseState::new(metal, compound)),
        })
    }
}
