use std::collections::BTreeMap;

use odre_core::{
    associate_substations, columns, distance, parse_lines, parse_substations, Coordinate,
    IssueCategory, OdreError, RowSet, SubstationGeoData,
};

/// Segment rows as `(line id, [start lat, start lon, end lat, end lon])`.
fn segments(rows: &[(&str, [f64; 4])]) -> RowSet {
    let mut headers = vec![columns::LINE_IDS[0].to_string()];
    headers.extend(columns::SEGMENT_HEADERS.iter().map(|c| c.to_string()));
    let mut set = RowSet::new(headers);
    for (id, [lat1, lon1, lat2, lon2]) in rows {
        set.push(vec![
            id.to_string(),
            lon1.to_string(),
            lat1.to_string(),
            lon2.to_string(),
            lat2.to_string(),
        ]);
    }
    set
}

fn c(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon)
}

fn cain_and_rambo() -> BTreeMap<String, SubstationGeoData> {
    let mut rows = RowSet::new(
        columns::SUBSTATION_HEADERS
            .iter()
            .map(|c| c.to_string())
            .collect(),
    );
    rows.push(vec!["CAIN".into(), "1".into(), "0".into()]);
    rows.push(vec!["RAMBO".into(), "5".into(), "6".into()]);
    parse_substations(&rows).unwrap()
}

fn zigzag() -> Vec<Coordinate> {
    vec![c(1.0, 1.0), c(1.0, 5.0), c(5.0, 1.0), c(5.0, 5.0)]
}

fn ends(
    substations: &BTreeMap<String, SubstationGeoData>,
    id: &str,
    path: &[Coordinate],
) -> (String, String) {
    let pair = associate_substations(substations, id, path).unwrap();
    (pair.start, pair.end)
}

fn pair(start: &str, end: &str) -> (String, String) {
    (start.to_string(), end.to_string())
}

#[test]
fn distance_matches_reference_values() {
    let d = distance(32.9697, -96.80322, 29.46786, -98.53506);
    assert!((d - 423_232.86).abs() / 423_232.86 < 1e-3, "got {d}");

    let degree = distance(0.0, 1.0, 1.0, 1.0);
    assert!((degree - 111_319.49).abs() < 1.0, "got {degree}");

    assert_eq!(distance(45.5, 2.25, 45.5, 2.25), 0.0);
    let there = distance(10.0, 20.0, 11.0, 21.5);
    let back = distance(11.0, 21.5, 10.0, 20.0);
    assert!((there - back).abs() < 1e-6);
}

#[test]
fn shuffled_chain_becomes_ordered_polyline() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[
        (id, [0.0, 2.0, 0.0, 3.0]),
        (id, [0.0, 0.0, 0.0, 1.0]),
        (id, [0.0, 3.0, 0.0, 4.0]),
        (id, [0.0, 2.0, 0.0, 1.0]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();

    let line = &import.lines[id];
    assert_eq!(line.coordinates.len(), 5);
    let lons: Vec<f64> = line.coordinates.iter().map(|p| p.lon).collect();
    assert!(
        lons == [0.0, 1.0, 2.0, 3.0, 4.0] || lons == [4.0, 3.0, 2.0, 1.0, 0.0],
        "got {lons:?}"
    );
    assert_eq!(import.stats.single_component, 1);
    assert_eq!(import.stats.reconstructed, 1);
}

#[test]
fn aerial_and_underground_segments_share_one_graph() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[(id, [0.0, 0.0, 0.0, 1.0])]);
    let underground = segments(&[(id, [0.0, 1.0, 0.0, 2.0])]);
    let import = parse_lines(&aerial, &underground, &BTreeMap::new()).unwrap();
    assert_eq!(import.lines[id].coordinates.len(), 3);
    assert_eq!(import.stats.multi_component, 0);
}

#[test]
fn junction_line_is_discarded_and_counted() {
    let id = "TEEAA L1TEEBB";
    let aerial = segments(&[
        (id, [0.0, 0.0, 1.0, 1.0]),
        (id, [2.0, 0.0, 1.0, 1.0]),
        (id, [1.0, 2.0, 1.0, 1.0]),
        ("CAIN  L1RAMBO", [0.0, 0.0, 0.0, 1.0]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();

    assert!(!import.lines.contains_key(id));
    assert!(import.lines.contains_key("CAIN  L1RAMBO"));
    assert_eq!(import.stats.total_lines, 2);
    assert_eq!(import.stats.single_component_discarded, 1);
    assert_eq!(import.stats.discarded(), 1);
    assert_eq!(
        import
            .diagnostics
            .by_category(IssueCategory::MalformedComponent)
            .count(),
        1
    );
    assert!(import.diagnostics.mentions(id));
}

#[test]
fn duplicated_segment_closes_the_chain() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[(id, [0.0, 0.0, 0.0, 1.0]), (id, [0.0, 0.0, 0.0, 1.0])]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();
    assert!(import.lines.is_empty());
    assert_eq!(import.stats.single_component_discarded, 1);
}

#[test]
fn stub_fragment_is_ignored() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[
        (id, [0.0, 0.0, 0.0, 1.0]),
        (id, [0.0, 1.0, 0.0, 2.0]),
        (id, [0.0, 3.0, 0.0, 3.05]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();

    let line = &import.lines[id];
    assert_eq!(line.coordinates, vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0)]);
    assert_eq!(import.stats.multi_component, 1);
    assert_eq!(import.stats.multi_component_discarded, 0);
}

#[test]
fn comparable_fragments_are_joined() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[
        (id, [0.0, 0.0, 0.0, 1.0]),
        (id, [0.0, 1.0, 0.0, 2.0]),
        (id, [0.0, 2.5, 0.0, 4.0]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();

    let lons: Vec<f64> = import.lines[id].coordinates.iter().map(|p| p.lon).collect();
    assert_eq!(lons, vec![0.0, 1.0, 2.0, 2.5, 4.0]);
}

#[test]
fn malformed_fragment_discards_whole_line() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[
        (id, [0.0, 0.0, 0.0, 1.0]),
        (id, [5.0, 5.0, 6.0, 6.0]),
        (id, [5.0, 5.0, 6.0, 6.0]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();
    assert!(import.lines.is_empty());
    assert_eq!(import.stats.multi_component, 1);
    assert_eq!(import.stats.multi_component_discarded, 1);
}

#[test]
fn association_follows_path_direction() {
    let substations = cain_and_rambo();
    let path = zigzag();
    let mut reversed = path.clone();
    reversed.reverse();

    assert_eq!(ends(&substations, "CAIN  Z4RAMBO", &path), pair("CAIN", "RAMBO"));
    assert_eq!(ends(&substations, "CAIN  Z4RAMBO", &reversed), pair("RAMBO", "CAIN"));
}

#[test]
fn single_known_substation_goes_to_nearest_end() {
    let substations = cain_and_rambo();
    let mut reversed = zigzag();
    reversed.reverse();

    assert_eq!(ends(&substations, "JOHN  Z4RAMBO", &reversed), pair("RAMBO", ""));
    assert_eq!(ends(&substations, "CAIN  Z4JOHN", &reversed), pair("", "CAIN"));
    assert_eq!(ends(&substations, "MCCAIN__JOHN", &reversed), pair("", ""));
}

#[test]
fn same_nearest_substation_at_both_ends_is_ambiguous() {
    let substations = cain_and_rambo();
    let half = vec![c(1.0, 1.0), c(1.0, 3.0)];
    assert_eq!(ends(&substations, "CAIN  Z4RAMBO", &half), pair("", ""));
}

#[test]
fn reconstructed_line_carries_substations_and_country() {
    let id = "CAIN  L1RAMBO";
    let aerial = segments(&[
        (id, [1.0, 1.0, 1.0, 5.0]),
        (id, [1.0, 5.0, 5.0, 1.0]),
        (id, [5.0, 1.0, 5.0, 5.0]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &cain_and_rambo()).unwrap();

    let line = &import.lines[id];
    assert_eq!(line.country1, "FR");
    assert_eq!(line.country2, "FR");
    let expected = if line.coordinates[0] == c(1.0, 1.0) {
        ("CAIN", "RAMBO")
    } else {
        ("RAMBO", "CAIN")
    };
    assert_eq!(
        (line.substation_start.as_str(), line.substation_end.as_str()),
        expected
    );
    assert!(!import.diagnostics.has_issues());
}

#[test]
fn ambiguous_and_missing_ends_are_counted() {
    let aerial = segments(&[
        ("CAIN  L1RAMBO", [1.0, 1.0, 1.0, 3.0]),
        ("CAIN  L1JOHN", [1.0, 1.0, 1.0, 3.0]),
    ]);
    let import = parse_lines(&aerial, &RowSet::default(), &cain_and_rambo()).unwrap();

    assert_eq!(import.lines.len(), 2);
    assert_eq!(import.stats.ambiguous_associations, 1);
    assert_eq!(import.stats.missing_substations, 1);
    let ambiguous = &import.lines["CAIN  L1RAMBO"];
    assert_eq!(ambiguous.substation_start, "");
    assert_eq!(ambiguous.substation_end, "");
}

#[test]
fn short_identifier_is_discarded() {
    let aerial = segments(&[("ABC", [0.0, 0.0, 0.0, 1.0])]);
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();
    assert!(import.lines.is_empty());
    assert_eq!(import.stats.short_identifier_discarded, 1);
    assert_eq!(
        import
            .diagnostics
            .by_category(IssueCategory::ShortIdentifier)
            .count(),
        1
    );
}

#[test]
fn unparsable_coordinate_aborts_the_batch() {
    let mut aerial = segments(&[("CAIN  L1RAMBO", [0.0, 0.0, 0.0, 1.0])]);
    aerial.push(vec![
        "CAIN  L1RAMBO".into(),
        "1.5".into(),
        "".into(),
        "2.0".into(),
        "3.0".into(),
    ]);
    let err = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap_err();
    match err {
        OdreError::UnparsableCoordinate { column, row, .. } => {
            assert_eq!(column, columns::SEGMENT_START_LAT);
            assert_eq!(row, 2);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn segment_listed_under_several_ids_feeds_each_line() {
    let mut headers: Vec<String> = columns::LINE_IDS.iter().map(|c| c.to_string()).collect();
    headers.extend(columns::SEGMENT_HEADERS.iter().map(|c| c.to_string()));
    let mut aerial = RowSet::new(headers);
    aerial.push(
        ["CAIN  L1RAMBO", "", "CAIN  L2RAMBO", "", "", "1", "0", "2", "0"]
            .iter()
            .map(|v| v.to_string())
            .collect(),
    );
    let import = parse_lines(&aerial, &RowSet::default(), &BTreeMap::new()).unwrap();
    assert_eq!(import.lines.len(), 2);
    assert_eq!(import.lines["CAIN  L2RAMBO"].coordinates.len(), 2);
}
