// File: crates/ellingham-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG from a two-compound table.

use ellingham_core::formula::pretty;
use ellingham_core::geometry::Projection;
use ellingham_core::{CompoundLine, CompoundTable, Diagram, Point, RenderOptions, TextShaper};

fn feo_al2o3() -> CompoundTable {
    CompoundTable::new(vec![
        CompoundLine::new("FeO", Point::new(0.0, -260.0), Point::new(1600.0, -150.0)),
        CompoundLine::new("Al2O3", Point::new(0.0, -1100.0), Point::new(1600.0, -820.0)),
    ])
    .expect("valid table")
}

#[test]
fn render_smoke_png() {
    let diagram = Diagram::build(&feo_al2o3());
    assert_eq!(diagram.lines.len(), 2);
    for line in &diagram.lines {
        assert_eq!(line.start().temperature, 0.0);
        assert_eq!(line.end().temperature, 1600.0);
    }
    let labels: Vec<_> = diagram.legend_entries().into_iter().map(|e| e.label).collect();
    assert_eq!(labels, ["FeO", "Al2O3"]);
    assert_eq!(diagram.x_axis.label, "Temperature (°C)");

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    diagram.render(&out, &opts).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = diagram.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (1600, 1000));
}

#[test]
fn render_bundled_with_annotations() {
    let table = CompoundTable::bundled().expect("bundled table");
    let diagram = Diagram::build(&table).with_title("All families");
    let opts = RenderOptions { width: 1200, height: 800, draw_annotations: true, ..RenderOptions::default() };
    let bytes = diagram.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (1200, 800));
    assert!(diagram.phase_states().len() > 1);
}

#[test]
fn autoscale_includes_zero_and_pads() {
    let diagram = Diagram::build(&feo_al2o3());
    // data spans 0..1600 and -1100..-150; zero energy is pulled in
    assert!(diagram.x_axis.min < 0.0 && diagram.x_axis.max > 1600.0);
    assert!(diagram.y_axis.min < -1100.0);
    assert!(diagram.y_axis.max > 0.0);
    assert!((diagram.x_axis.max - 1680.0).abs() < 1e-9);

    let mut fixed = Diagram::build(&feo_al2o3()).with_x_bounds(200.0, 1400.0).with_y_bounds(-1200.0, 0.0);
    assert_eq!((fixed.x_axis.min, fixed.x_axis.max), (200.0, 1400.0));
    fixed.autoscale_axes(0.0);
    assert_eq!((fixed.x_axis.min, fixed.x_axis.max), (0.0, 1600.0));
    assert_eq!((fixed.y_axis.min, fixed.y_axis.max), (-1100.0, 0.0));
}

#[test]
fn annotations_stay_inside_the_plot() {
    let table = CompoundTable::bundled().expect("bundled table");
    let diagram = Diagram::build(&table);
    let opts = RenderOptions { draw_annotations: true, ..RenderOptions::default() };
    let text = TextShaper::new();
    let plot = diagram.plot_area(&opts);
    let axis = diagram.annotation_axis(plot, &text);
    assert!(axis.min <= diagram.x_axis.min);
    assert_eq!(axis.max, diagram.x_axis.max);

    let proj = Projection::new(plot, &axis, &diagram.y_axis);
    for line in &diagram.lines {
        let width = text.measure_width(&pretty(&line.label), 11.0, false);
        let left = proj.sx(line.start().temperature) - 6.0 - width;
        assert!(left >= plot.left as f32 - 0.5, "'{}' starts at {left}, plot at {}", line.label, plot.left);
    }
}

#[test]
fn invalid_bounds_are_ignored() {
    let diagram = Diagram::build(&feo_al2o3());
    let (x, y) = ((diagram.x_axis.min, diagram.x_axis.max), (diagram.y_axis.min, diagram.y_axis.max));

    let diagram = diagram
        .with_x_bounds(500.0, 500.0)
        .with_x_bounds(900.0, 100.0)
        .with_y_bounds(f64::NAN, 0.0)
        .with_y_bounds(-100.0, f64::INFINITY);
    assert_eq!((diagram.x_axis.min, diagram.x_axis.max), x);
    assert_eq!((diagram.y_axis.min, diagram.y_axis.max), y);

    let diagram = diagram.with_x_bounds(-800.0, 2000.0);
    assert_eq!((diagram.x_axis.min, diagram.x_axis.max), (-800.0, 2000.0));
}
