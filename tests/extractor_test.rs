use geo_types::{Coord, Geometry, LineString, Point, Polygon};
use osm_power_extract::data::source::{PbfSource, VecSource};
use osm_power_extract::data::types::{Category, ElementKind, MapElement};
use osm_power_extract::{extract_from_path, ExtractError, Extractor};
use std::collections::HashMap;
use std::io::Write;

fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn square() -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ]),
        vec![],
    )
}

/// One turbine node and one solar-plant way: two records, in order, with
/// the full tag mappings retained.
#[test]
fn test_mixed_extract_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let turbine = MapElement::new(
        ElementKind::Node,
        101,
        tags(&[
            ("power", "generator"),
            ("generator:source", "wind"),
            ("name", "TurbineA"),
        ]),
        Geometry::Point(Point::new(4.35, 50.85)),
    );
    let plant = MapElement::new(
        ElementKind::Way,
        202,
        tags(&[("power", "plant"), ("plant:source", "solar")]),
        Geometry::Polygon(square()),
    );

    let mut extractor = Extractor::new();
    extractor.run(VecSource::new(vec![turbine, plant])).unwrap();

    let records = extractor.records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].category, Category::WindGenerator);
    assert_eq!(records[0].source_id, 101);
    assert_eq!(records[0].source_kind, ElementKind::Node);
    assert_eq!(records[0].name(), Some("TurbineA"));
    assert_eq!(records[0].tags.len(), 3);
    assert_eq!(
        records[0].tags.get("generator:source").map(String::as_str),
        Some("wind")
    );

    assert_eq!(records[1].category, Category::SolarPlant);
    assert_eq!(records[1].source_id, 202);
    assert_eq!(records[1].source_kind, ElementKind::Way);
    assert!(matches!(records[1].geometry, Geometry::Polygon(_)));
}

/// A generator sourced from solar matches neither pattern and produces
/// no record.
#[test]
fn test_mismatched_combination_scenario() {
    let node = MapElement::new(
        ElementKind::Node,
        7,
        tags(&[("power", "generator"), ("generator:source", "solar")]),
        Geometry::Point(Point::new(0.0, 0.0)),
    );

    let mut extractor = Extractor::new();
    extractor.run(VecSource::new(vec![node])).unwrap();
    assert!(extractor.records().is_empty());
    assert_eq!(extractor.stats().nodes_visited, 1);
}

/// Two passes over identical input yield identical sequences.
#[test]
fn test_idempotent_over_same_input() {
    let elements = vec![
        MapElement::new(
            ElementKind::Node,
            1,
            tags(&[("power", "generator"), ("generator:source", "wind")]),
            Geometry::Point(Point::new(6.1, 53.3)),
        ),
        MapElement::new(
            ElementKind::Way,
            2,
            tags(&[("power", "plant"), ("plant:source", "solar")]),
            Geometry::Polygon(square()),
        ),
        MapElement::new(
            ElementKind::Node,
            3,
            tags(&[("natural", "water")]),
            Geometry::Point(Point::new(6.2, 53.4)),
        ),
    ];

    let mut first = Extractor::new();
    first.run(VecSource::new(elements.clone())).unwrap();
    let mut second = Extractor::new();
    second.run(VecSource::new(elements)).unwrap();

    assert_eq!(first.records().len(), second.records().len());
    for (a, b) in first.records().iter().zip(second.records().iter()) {
        assert_eq!(a.source_id, b.source_id);
        assert_eq!(a.source_kind, b.source_kind);
        assert_eq!(a.category, b.category);
        assert_eq!(a.tags, b.tags);
    }
}

/// A missing input path is a fatal I/O error, not an empty result.
#[test]
fn test_missing_path_is_io_error() {
    let result = extract_from_path("/nonexistent/belgium-latest.osm.pbf");
    match result {
        Err(ExtractError::Io(_)) => {}
        other => panic!("expected Io error, got {:?}", other.map(|r| r.len())),
    }
}

/// A file that is not valid PBF aborts the pass with a decode error and
/// returns no partial records.
#[test]
fn test_garbage_file_is_format_error() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"this is not a pbf extract").unwrap();
    temp.flush().unwrap();

    let source = PbfSource::from_path(temp.path()).unwrap();
    let mut extractor = Extractor::new();
    let result = extractor.run(source);
    assert!(matches!(result, Err(ExtractError::Pbf(_))));
    assert!(extractor.records().is_empty());
}
