// File: crates/ellingham-cli/src/main.rs
// Summary: `ellingham` binary; loads a compound table (bundled or CSV) and renders a diagram or two-panel figure to PNG/JPEG/SVG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ellingham_core::figure::FIGURE_WIDTH;
use ellingham_core::types::{HEIGHT, WIDTH};
use ellingham_core::{theme, CompoundTable, Diagram, Family, Figure, RenderOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Render an Ellingham diagram (ΔG°f against temperature).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file; the extension picks the format (png, jpg, svg)
    #[arg(default_value = "ellingham.png")]
    output: PathBuf,

    /// Compound table CSV (defaults to the bundled data set); also read from ELLINGHAM_DATA
    #[arg(long, env = "ELLINGHAM_DATA")]
    data: Option<PathBuf>,

    /// Only draw this family (oxide, carbide, nitride, fluoride, chloride); repeatable
    #[arg(long = "family", value_parser = parse_family)]
    families: Vec<Family>,

    /// Diagram title
    #[arg(long)]
    title: Option<String>,

    /// Theme name (light, dark, solarized-light, solarized-dark, high-contrast-dark)
    #[arg(long, default_value = "light")]
    theme: String,

    /// Image width in pixels [default: 1600, or 2600 with --panels]
    #[arg(long)]
    width: Option<i32>,

    /// Image height in pixels
    #[arg(long, default_value_t = HEIGHT)]
    height: i32,

    /// Oxides and the other families on two side-by-side panels
    #[arg(long)]
    panels: bool,

    /// Leave out the data sources note (panels mode)
    #[arg(long, requires = "panels")]
    no_sources: bool,

    /// Temperature range as MIN:MAX (°C); autoscaled when omitted
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    x_range: Option<(f64, f64)>,

    /// Free-energy range as MIN:MAX (kJ/mol); autoscaled when omitted
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    y_range: Option<(f64, f64)>,

    /// Hide the temperature gridlines
    #[arg(long)]
    no_grid: bool,

    /// Hide the legend panel
    #[arg(long)]
    no_legend: bool,

    /// Write reaction labels beside each line
    #[arg(long)]
    annotate: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            _ => "trace",
        }
    }

    /// Grid flag and fixed ranges from the command line.
    fn apply_bounds(&self, mut diagram: Diagram) -> Diagram {
        diagram = diagram.with_grid(!self.no_grid);
        if let Some((lo, hi)) = self.x_range {
            diagram = diagram.with_x_bounds(lo, hi);
        }
        if let Some((lo, hi)) = self.y_range {
            diagram = diagram.with_y_bounds(lo, hi);
        }
        diagram
    }

    fn render_options(&self) -> RenderOptions {
        let default_width = if self.panels { FIGURE_WIDTH } else { WIDTH };
        RenderOptions {
            width: self.width.unwrap_or(default_width),
            height: self.height,
            theme: theme::find(&self.theme),
            draw_legend: !self.no_legend,
            draw_annotations: self.annotate,
            ..RenderOptions::default()
        }
    }
}

fn parse_family(s: &str) -> Result<Family, String> {
    Family::from_name(s).ok_or_else(|| {
        let names: Vec<_> = Family::ALL.iter().map(|f| f.name()).collect();
        format!("unknown family '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{s}'"))?;
    let lo: f64 = lo.trim().parse().map_err(|_| format!("invalid minimum '{lo}'"))?;
    let hi: f64 = hi.trim().parse().map_err(|_| format!("invalid maximum '{hi}'"))?;
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(format!("range '{s}' must satisfy MIN < MAX"));
    }
    Ok((lo, hi))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?args, "parsed arguments");

    let table = match &args.data {
        Some(path) => CompoundTable::from_path(path)
            .with_context(|| format!("failed to load compound table '{}'", path.display()))?,
        None => CompoundTable::bundled().context("bundled compound table is invalid")?,
    };
    let table = table.filter_families(&args.families);
    info!(lines = table.len(), "loaded compound table");

    let opts = args.render_options();
    let rendered = if args.panels {
        let mut figure = Figure::ellingham(&table).map_panels(|panel| args.apply_bounds(panel));
        if let Some(title) = &args.title {
            figure = figure.with_title(title.as_str());
        }
        if args.no_sources {
            figure = figure.with_sources(Vec::<String>::new());
        }
        figure.render(&args.output, &opts)
    } else {
        let mut diagram = args.apply_bounds(Diagram::build(&table));
        if let Some(title) = &args.title {
            diagram = diagram.with_title(title.as_str());
        }
        diagram.render(&args.output, &opts)
    };
    rendered.with_context(|| format!("failed to render '{}'", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_bundled_table_to_png() {
        let args = Args::try_parse_from(["ellingham"]).unwrap();
        assert_eq!(args.output, PathBuf::from("ellingham.png"));
        assert!(args.families.is_empty());
        assert_eq!(args.log_level(), "info");
        let opts = args.render_options();
        assert_eq!((opts.width, opts.height), (1600, 1000));
        assert!(opts.draw_legend);
        assert!(!opts.draw_annotations);
    }

    #[test]
    fn families_and_ranges_parse() {
        let args = Args::try_parse_from([
            "ellingham", "out.svg", "--family", "oxides", "--family", "Nitride",
            "--y-range", "-1200:0", "--x-range", "0:1800", "-vv",
        ])
        .unwrap();
        assert_eq!(args.families, vec![Family::Oxide, Family::Nitride]);
        assert_eq!(args.y_range, Some((-1200.0, 0.0)));
        assert_eq!(args.x_range, Some((0.0, 1800.0)));
        assert_eq!(args.log_level(), "trace");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Args::try_parse_from(["ellingham", "--family", "sulfide"]).is_err());
        assert!(Args::try_parse_from(["ellingham", "--x-range", "100"]).is_err());
        assert!(parse_range("5:1").is_err());
        assert!(parse_range("a:1").is_err());
        assert!(Args::try_parse_from(["ellingham", "-q", "-v"]).is_err());
    }

    #[test]
    fn quiet_and_theme_map_onto_options() {
        let args = Args::try_parse_from(["ellingham", "-q", "--theme", "Dark", "--no-legend", "--annotate"]).unwrap();
        assert_eq!(args.log_level(), "warn");
        let opts = args.render_options();
        assert_eq!(opts.theme.name, "dark");
        assert!(!opts.draw_legend);
        assert!(opts.draw_annotations);
    }

    #[test]
    fn panels_mode_widens_the_default_canvas() {
        let args = Args::try_parse_from(["ellingham", "--panels", "--no-sources"]).unwrap();
        assert_eq!(args.render_options().width, FIGURE_WIDTH);
        let args = Args::try_parse_from(["ellingham", "--panels", "--width", "1800"]).unwrap();
        assert_eq!(args.render_options().width, 1800);
        // sources note only exists on the figure
        assert!(Args::try_parse_from(["ellingham", "--no-sources"]).is_err());
    }

    #[test]
    fn ranges_and_grid_flag_reach_the_diagram() {
        let args = Args::try_parse_from(["ellingham", "--x-range", "-800:2000", "--no-grid"]).unwrap();
        let diagram = args.apply_bounds(Diagram::new());
        assert_eq!((diagram.x_axis.min, diagram.x_axis.max), (-800.0, 2000.0));
        assert!(!diagram.show_grid);
    }

    #[test]
    fn data_path_can_come_from_the_environment() {
        std::env::set_var("ELLINGHAM_DATA", "tables/custom.csv");
        let args = Args::try_parse_from(["ellingham"]);
        std::env::remove_var("ELLINGHAM_DATA");
        assert_eq!(args.unwrap().data, Some(PathBuf::from("tables/custom.csv")));

        let args = Args::try_parse_from(["ellingham", "--data", "a.csv"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("a.csv")));
    }
}
