// File: crates/ellingham-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small diagram (two phase regimes, no text) to PNG bytes.
// - Always checks pixels at known data coordinates: background corner, the NiO line, the zero-energy line.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if a snapshot exists, compares decoded pixels for exact match.

use ellingham_core::geometry::Projection;
use ellingham_core::{CompoundLine, CompoundTable, Diagram, Phase, PhaseState, Point, RenderOptions, Segment};
use image::RgbaImage;

fn diagram() -> Diagram {
    let lines = vec![
        CompoundLine::new("2Ni + O2 = 2NiO", Point::new(0.0, -420.0), Point::new(1400.0, -180.0)),
        CompoundLine::new("2Mg + O2 = 2MgO", Point::new(0.0, -1140.0), Point::new(650.0, -1000.0)).with_segment(
            Segment::new(
                Point::new(650.0, -1000.0),
                Point::new(1100.0, -900.0),
                PhaseState::new(Phase::Liquid, Phase::Solid),
            ),
        ),
    ];
    Diagram::build(&CompoundTable::new(lines).expect("valid table"))
}

fn opts() -> RenderOptions {
    RenderOptions { width: 480, height: 300, draw_labels: false, ..RenderOptions::default() }
}

fn render_bytes(diagram: &Diagram) -> Vec<u8> {
    // Render via public API to a temp file then read back
    let tmp = std::path::PathBuf::from("target/test_out/snapshot_tmp.png");
    diagram.render(&tmp, &opts()).expect("render to tmp");
    std::fs::read(tmp).expect("read tmp png")
}

/// Any pixel in the 5x5 block around (x, y) satisfying `pred`.
fn near(img: &RgbaImage, (x, y): (f32, f32), pred: impl Fn([u8; 4]) -> bool) -> bool {
    let (cx, cy) = (x.round() as i64, y.round() as i64);
    (-2..=2).any(|dy| {
        (-2..=2).any(|dx| {
            let (px, py) = (cx + dx, cy + dy);
            px >= 0
                && py >= 0
                && (px as u32) < img.width()
                && (py as u32) < img.height()
                && pred(img.get_pixel(px as u32, py as u32).0)
        })
    })
}

fn check_known_pixels(diagram: &Diagram, img: &RgbaImage) {
    assert_eq!(img.dimensions(), (480, 300));
    let white = |p: [u8; 4]| p[0] == 255 && p[1] == 255 && p[2] == 255;
    assert!(white(img.get_pixel(2, 2).0), "corner should be background");

    let plot = diagram.plot_area(&opts());
    let proj = Projection::new(plot, &diagram.x_axis, &diagram.y_axis);

    // NiO passes through (700 °C, -300 kJ/mol) in the first palette colour (blue)
    let on_nio = proj.point(700.0, -300.0);
    assert!(
        near(img, on_nio, |p| p[2] as i32 > p[0] as i32 + 30),
        "no blue line pixel near {on_nio:?}"
    );

    // zero-energy reference line
    let on_zero = (proj.sx(700.0), proj.sy(0.0));
    assert!(near(img, on_zero, |p| !white(p)), "no reference line pixel near {on_zero:?}");
}

#[test]
fn golden_basic_diagram() {
    let diagram = diagram();
    let bytes = render_bytes(&diagram);
    let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
    check_known_pixels(&diagram, &got_img);

    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("basic_diagram.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    }
}

#[test]
fn rendering_is_deterministic() {
    let diagram = diagram();
    let decode = |bytes: Vec<u8>| image::load_from_memory(&bytes).unwrap().to_rgba8();
    let a = decode(diagram.render_to_png_bytes(&opts()).unwrap());
    let b = decode(diagram.render_to_png_bytes(&opts()).unwrap());
    assert_eq!(a.as_raw(), b.as_raw());
    check_known_pixels(&diagram, &a);
}
