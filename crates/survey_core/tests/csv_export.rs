use survey_core::export::CSV_HEADER;
use survey_core::{default_observations, to_csv, write_csv, CSV_FILE_NAME};

#[test]
fn default_fixture_exports_header_plus_four_rows() {
    let csv = to_csv(&default_observations());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(csv.ends_with('\n'));
    for line in &lines[1..] {
        assert!(line.starts_with('"'), "area must be quoted: {line}");
        assert!(line.ends_with('"'), "note must be quoted: {line}");
    }
    assert_eq!(
        lines[4],
        r#""Residential Block A",16.42,80.58,32.3,No,95,50,0.55,0.68,"Shaded street""#
    );
}

#[test]
fn embedded_quotes_are_doubled() {
    let mut observations = default_observations();
    observations[0].note = r#"kids call it "the oven""#.to_string();
    observations[1].area = r#"Vijeta "High" School"#.to_string();

    let csv = to_csv(&observations);
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[1].ends_with(r#","kids call it ""the oven""""#));
    assert!(lines[2].starts_with(r#""Vijeta ""High"" School","#));
}

#[test]
fn absent_ndvi_exports_empty_cells() {
    let mut observations = default_observations();
    observations.truncate(1);
    observations[0].ndvi_now = None;
    observations[0].ndvi_past = None;

    let csv = to_csv(&observations);
    assert!(csv.contains(",22,,,\"Playground exposed\""));
}

#[test]
fn write_csv_creates_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports");

    let path = write_csv(&target, &default_observations()).unwrap();

    assert_eq!(path, target.join(CSV_FILE_NAME));
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written, to_csv(&default_observations()));
}
