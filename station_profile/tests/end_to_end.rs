use assert_fs::prelude::*;
use predicates::prelude::*;
use station_profile::config::{Config, MarkConfig};
use station_profile::drawing::{emit, OutputFormat, Primitive, RecordingSink};
use station_profile::io::{read_profile_csv, read_table, Delimiter};
use station_profile::pipeline::{plan_marks, run, RunPaths};
use station_profile::profile::{normalize, ProfileScale};
use station_profile::resolver::ResolverKind;
use station_profile::stations::{build_stations, read_segments, LengthPolicy, SegmentColumns};
use station_profile::{ProfileError, Station};

const PROFILE: &str = "Distance (km)\tAltitude (x10 m)\n0\t10\n1\t20\n";

#[test]
fn km_profile_scales_and_ties_resolve_to_first_sample() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("data.txt");
    input.write_str(PROFILE).unwrap();

    let table = read_table(input.path(), Delimiter::Tab).unwrap();
    let profile = normalize(&table, &ProfileScale::default()).unwrap();
    assert_eq!(profile.total_length(), 1000.0);

    let mut config = MarkConfig::default();
    config.style.tick_height = 1000.0;
    for resolver in [ResolverKind::Linear, ResolverKind::Sorted] {
        config.resolver = resolver;
        let marks = plan_marks(&profile, &[Station::new(500.0, "Mid")], &config);
        assert_eq!(marks[0].altitude, 100.0);
        assert_eq!(marks[0].tick.start.y, -400.0);
        assert_eq!(marks[0].tick.end.y, 600.0);
        assert!((marks[0].label_anchor.y - 800.0).abs() < 1e-9);
    }
    dir.close().unwrap();
}

#[test]
fn segment_file_to_stations() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("lengths.csv");
    input
        .write_str("id,kind,length,name\n1,pole,60.19,A\n2,pole,,nan\n3,pole,225,B\n")
        .unwrap();

    let table = read_table(input.path(), Delimiter::Comma).unwrap();
    let segments =
        read_segments(&table, &SegmentColumns::default(), LengthPolicy::CoerceToZero).unwrap();
    let stations = build_stations(&segments);
    let got: Vec<(f64, &str)> = stations.iter().map(|s| (s.position, s.name.as_str())).collect();
    assert_eq!(got, vec![(60.19, "A"), (60.19, ""), (285.19, "B")]);

    let err = read_segments(&table, &SegmentColumns::default(), LengthPolicy::Reject).unwrap_err();
    assert!(matches!(err, ProfileError::MalformedValue { row: 2, .. }));
    dir.close().unwrap();
}

#[test]
fn run_writes_drawing_and_profile_table() {
    let dir = assert_fs::TempDir::new().unwrap();
    let profile = dir.child("data.txt");
    profile.write_str(PROFILE).unwrap();
    let segments = dir.child("lengths.csv");
    segments
        .write_str("id,kind,length,name\n1,pole,250,A\n2,pole,500,B\n")
        .unwrap();
    let dxf = dir.child("out.dxf");
    let csv = dir.child("out.csv");

    let summary = run(
        &Config::default(),
        &RunPaths {
            profile: profile.path().to_path_buf(),
            segments: segments.path().to_path_buf(),
            profile_csv: Some(csv.path().to_path_buf()),
            drawing: dxf.path().to_path_buf(),
            format: None,
        },
    )
    .unwrap();

    assert_eq!(summary.samples, 2);
    assert_eq!(summary.stations, 2);
    assert_eq!(summary.line_length, 750.0);
    assert_eq!(summary.format, OutputFormat::Dxf);
    dxf.assert(predicate::str::contains("profile_polyline"));
    dxf.assert(predicate::str::contains("profile_marks"));
    csv.assert("distance_m,altitude_x10\n0,100\n1000,200\n");

    let back = read_profile_csv(csv.path()).unwrap();
    assert_eq!(back.samples().len(), 2);
    assert_eq!(back.samples()[1].elevation, 200.0);
    dir.close().unwrap();
}

#[test]
fn schema_error_leaves_no_outputs() {
    let dir = assert_fs::TempDir::new().unwrap();
    let profile = dir.child("data.txt");
    profile.write_str("distance\televation\n0\t10\n").unwrap();
    let segments = dir.child("lengths.csv");
    segments.write_str("id,kind,length,name\n1,pole,10,A\n").unwrap();
    let dxf = dir.child("out.dxf");
    let csv = dir.child("out.csv");

    let err = run(
        &Config::default(),
        &RunPaths {
            profile: profile.path().to_path_buf(),
            segments: segments.path().to_path_buf(),
            profile_csv: Some(csv.path().to_path_buf()),
            drawing: dxf.path().to_path_buf(),
            format: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ProfileError::Schema(_)));
    dxf.assert(predicate::path::missing());
    csv.assert(predicate::path::missing());
    dir.close().unwrap();
}

#[test]
fn emitted_primitives_follow_stations() {
    let table = station_profile::io::Table::from_lines(
        &["distance\taltitude", "0\t10", "0.5\t12", "1\t15"],
        Delimiter::Tab,
    );
    let profile = normalize(&table, &ProfileScale::default()).unwrap();
    let stations = vec![Station::new(400.0, "A"), Station::new(1200.0, "Far")];
    let marks = plan_marks(&profile, &stations, &MarkConfig::default());

    let config = Config::default();
    let mut sink = RecordingSink::new();
    emit(&profile, &marks, &config.drawing, &mut sink).unwrap();

    let texts: Vec<(&str, f64)> = sink
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Text { content, anchor, .. } => Some((content.as_str(), anchor.x)),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec![("A", 400.0), ("Far", 1200.0)]);
    // Beyond the last sample the altitude snaps to it.
    assert_eq!(marks[1].altitude, 150.0);
    assert_eq!(marks[0].altitude, 120.0);
}
