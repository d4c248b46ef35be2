// File: crates/ellingham-core/tests/table.rs
// Purpose: Compound table validation, CSV loading, unit conversion and phase-segment merging.

use ellingham_core::{
    CompoundLine, CompoundTable, Dash, Family, Phase, PhaseState, Point, Segment, TableError,
};

fn line(label: &str, t0: f64, t1: f64) -> CompoundLine {
    CompoundLine::new(label, Point::new(t0, -500.0), Point::new(t1, -300.0))
}

#[test]
fn bundled_table_holds_invariants() {
    let table = CompoundTable::bundled().expect("bundled table parses");
    assert!(table.len() > 50, "expected the full data set, got {}", table.len());

    let mut labels = std::collections::HashSet::new();
    for l in table.lines() {
        assert!(l.start().temperature < l.end().temperature, "{}", l.label);
        for s in l.segments() {
            assert!(s.start.temperature < s.end.temperature, "{} segment {:?}", l.label, s.phase);
        }
        for w in l.segments().windows(2) {
            assert!(w[0].start.temperature <= w[1].start.temperature, "{} out of order", l.label);
        }
        assert!(labels.insert(l.label.clone()), "duplicate label {}", l.label);
    }

    for family in Family::ALL {
        let only = table.filter_families(&[family]);
        assert!(!only.is_empty(), "no {} lines", family.name());
        assert!(only.lines().iter().all(|l| l.family == Some(family)));
    }
}

#[test]
fn bundled_iron_oxide_merges_phase_segments() {
    let table = CompoundTable::bundled().unwrap();
    let feo = table.get("2Fe + O2 = 2FeO").expect("FeO present");
    assert_eq!(feo.family, Some(Family::Oxide));
    assert_eq!(feo.segments().len(), 3);
    assert_eq!(feo.segments()[0].phase, PhaseState::SOLID);
    assert_eq!(feo.segments()[1].phase, PhaseState::new(Phase::Solid, Phase::Liquid));
    assert_eq!(feo.segments()[2].phase, PhaseState::new(Phase::Liquid, Phase::Liquid));

    // 0 K, -124.1 kcal
    assert!((feo.start().temperature + 273.15).abs() < 1e-9);
    assert!((feo.start().energy + 124.1 * 4.184).abs() < 1e-9);
    assert_eq!(feo.label_offset, -9.0);
}

#[test]
fn explicit_table_rejects_duplicates_and_bad_spans() {
    let dup = CompoundTable::new(vec![line("FeO", 0.0, 1600.0), line("FeO", 0.0, 1200.0)]);
    assert!(matches!(dup, Err(TableError::DuplicateLabel { label }) if label == "FeO"));

    let backwards = CompoundTable::new(vec![line("Al2O3", 1600.0, 0.0)]);
    assert!(matches!(backwards, Err(TableError::InvalidSpan { label }) if label == "Al2O3"));

    let zero = CompoundTable::new(vec![line("MgO", 500.0, 500.0)]);
    assert!(matches!(zero, Err(TableError::InvalidSpan { .. })));

    let nan = CompoundTable::new(vec![CompoundLine::new(
        "CaO",
        Point::new(0.0, f64::NAN),
        Point::new(100.0, -1.0),
    )]);
    assert!(matches!(nan, Err(TableError::InvalidSpan { .. })));

    let ok = CompoundTable::new(vec![line("FeO", 0.0, 1600.0), line("Al2O3", 0.0, 1600.0)]).unwrap();
    assert_eq!(ok.len(), 2);
    assert_eq!(ok.lines()[0].label, "FeO");
    assert!(CompoundTable::empty().is_empty());
}

#[test]
fn csv_converts_units_and_reads_styles() {
    let csv = "\
# comment lines are skipped
Reaction, T0, T1, G0, G1, temp_unit, energy_unit, color, dash
A + O2 = AO2, 273.15, 1273.15, -100, -50, K, kcal, #112233, dotted
B + O2 = BO2, 0, 1000, -400, -300, , , ,
";
    let table = CompoundTable::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);

    let a = table.get("A + O2 = AO2").unwrap();
    assert!((a.start().temperature - 0.0).abs() < 1e-9);
    assert!((a.end().temperature - 1000.0).abs() < 1e-9);
    assert!((a.start().energy + 418.4).abs() < 1e-9);
    let style = a.style.expect("style hint");
    assert_eq!(style.color, Some(skia_safe::Color::from_rgb(0x11, 0x22, 0x33)));
    assert_eq!(style.dash, Some(Dash::Dotted));
    assert_eq!(a.family, None);

    let b = table.get("B + O2 = BO2").unwrap();
    assert_eq!(b.start(), Point::new(0.0, -400.0));
    assert_eq!(b.style, None);
    assert_eq!(b.segments()[0].phase, PhaseState::SOLID);
}

#[test]
fn csv_rows_with_same_label_merge_in_temperature_order() {
    let csv = "\
label,metal_phase,compound_phase,t0,t1,g0,g1,family
X,liquid,solid,600,900,-200,-150,nitrides
X,solid,solid,0,600,-260,-200,nitride
";
    let table = CompoundTable::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 1);
    let x = &table.lines()[0];
    assert_eq!(x.segments().len(), 2);
    assert_eq!(x.start(), Point::new(0.0, -260.0));
    assert_eq!(x.end(), Point::new(900.0, -150.0));
    assert_eq!(x.energy_range(), (-260.0, -150.0));
    // first row decides the family
    assert_eq!(x.family, Some(Family::Nitride));
}

#[test]
fn csv_errors_name_the_problem() {
    let missing = CompoundTable::from_reader("reaction,t0,t1,g0\nA,0,1,2\n".as_bytes());
    assert!(matches!(missing, Err(TableError::MissingColumn("g1"))));

    let bad_number = CompoundTable::from_reader("reaction,t0,t1,g0,g1\nA,0,1,2,3\nB,0,x,2,3\n".as_bytes());
    match bad_number {
        Err(TableError::InvalidNumber { record, column, value }) => {
            assert_eq!(record, 2);
            assert_eq!(column, "t1");
            assert_eq!(value, "x");
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }

    let bad_phase = CompoundTable::from_reader("reaction,t0,t1,g0,g1,metal_phase\nA,0,1,2,3,plasma\n".as_bytes());
    assert!(matches!(bad_phase, Err(TableError::InvalidValue { record: 1, what: "metal phase", .. })));

    let bad_unit = CompoundTable::from_reader("reaction,t0,t1,g0,g1,energy_unit\nA,0,1,2,3,eV\n".as_bytes());
    assert!(matches!(bad_unit, Err(TableError::InvalidValue { what: "energy unit", .. })));

    let same_phase = CompoundTable::from_reader("reaction,t0,t1,g0,g1\nA,0,1,2,3\nA,1,2,3,4\n".as_bytes());
    assert!(matches!(same_phase, Err(TableError::DuplicateLabel { .. })));

    let backwards = CompoundTable::from_reader("reaction,t0,t1,g0,g1\nA,10,1,2,3\n".as_bytes());
    assert!(matches!(backwards, Err(TableError::InvalidSpan { .. })));

    let io = CompoundTable::from_path("does/not/exist.csv");
    assert!(matches!(io, Err(TableError::Io { .. })));
}

#[test]
fn headers_only_csv_is_an_empty_table() {
    let table = CompoundTable::from_reader("reaction,t0,t1,g0,g1\n".as_bytes()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn segment_builder_keeps_order_and_phase_styling() {
    let l = CompoundLine::from_segment(
        "Y",
        Segment::new(Point::new(500.0, -10.0), Point::new(900.0, -5.0), PhaseState::new(Phase::Gas, Phase::Liquid)),
    )
    .with_segment(Segment::new(Point::new(0.0, -20.0), Point::new(500.0, -10.0), PhaseState::SOLID))
    .with_family(Family::Chloride);

    assert_eq!(l.start().temperature, 0.0);
    let last = &l.segments()[1];
    let style = l.style_for(last, 0);
    assert_eq!(style.dash, Dash::Dotted);
    assert!((style.alpha - 0.6).abs() < 1e-6);
    assert_eq!(style.color, Family::Chloride.color());
}
