// File: crates/ellingham-core/src/lib.rs
// Summary: Core library entry point; exports public API for table loading, diagrams and multi-panel figures.

pub mod axis;
pub mod compound;
pub mod diagram;
pub mod error;
pub mod figure;
pub mod formula;
pub mod geometry;
pub mod grid;
pub mod legend;
pub mod output;
pub mod table;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::Axis;
pub use compound::{CompoundLine, Dash, Family, LineStyle, Phase, PhaseState, Point, Segment, StyleHint};
pub use diagram::{Diagram, RenderOptions};
pub use figure::Figure;
pub use output::OutputFormat;
pub use error::{RenderError, TableError};
pub use legend::LegendEntry;
pub use table::{CompoundTable, EnergyUnit, TemperatureUnit};
pub use text::TextShaper;
pub use theme::Theme;
