use super::*;
use approx::assert_abs_diff_eq;

fn read_str(text: &str) -> HeartResult<Vec<Point2D>> {
    read_from(text.as_bytes(), "inline.txt")
}

fn written(points: &[Point2D], opts: &WriteOptions) -> String {
    let mut buf = Vec::new();
    write_to(&mut buf, points, opts).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn reads_header_and_rows() {
    let pts = read_str("x,y\n0.0,1.0\n1.0,0.0\n").unwrap();
    assert_eq!(pts, vec![Point2D::new(0.0, 1.0), Point2D::new(1.0, 0.0)]);
}

#[test]
fn header_is_optional() {
    let pts = read_str("0.5,-2\n3,4e2\n").unwrap();
    assert_eq!(pts, vec![Point2D::new(0.5, -2.0), Point2D::new(3.0, 400.0)]);
}

#[test]
fn blank_lines_whitespace_and_crlf_are_tolerated() {
    let pts = read_str("x,y\r\n\r\n 1.5 , 2.5 \r\n\n-1,-2\r\n").unwrap();
    assert_eq!(pts, vec![Point2D::new(1.5, 2.5), Point2D::new(-1.0, -2.0)]);
}

#[test]
fn non_numeric_field_fails_with_its_line() {
    let err = read_str("x,y\nabc,1.0\n").unwrap_err();
    match err {
        HeartError::Parse { line, path, .. } => {
            assert_eq!(line, 2);
            assert_eq!(path, PathBuf::from("inline.txt"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn partially_numeric_first_line_is_data_not_header() {
    let err = read_str("abc,1.0\n1,2\n").unwrap_err();
    assert!(matches!(err, HeartError::Parse { line: 1, .. }), "{err}");
}

#[test]
fn wrong_field_count_fails() {
    for (text, line) in [("x,y\n1,2\n1,2,3\n", 3), ("x,y\n1\n", 2), ("1,2\n\n5;6\n", 3)] {
        let err = read_str(text).unwrap_err();
        match err {
            HeartError::Parse { line: got, message, .. } => {
                assert_eq!(got, line, "{text:?}");
                assert!(message.contains("expected 2 fields"), "{message}");
            }
            other => panic!("unexpected error for {text:?}: {other}"),
        }
    }
}

#[test]
fn non_finite_values_fail() {
    for text in ["x,y\nnan,1\n", "x,y\n1,inf\n", "x,y\n-infinity,0\n"] {
        let err = read_str(text).unwrap_err();
        assert!(matches!(err, HeartError::Parse { line: 2, .. }), "{err}");
    }
}

#[test]
fn no_partial_result_on_late_failure() {
    let mut text = String::from("x,y\n");
    for i in 0..50 {
        text.push_str(&format!("{i},{i}\n"));
    }
    text.push_str("oops\n");
    assert!(read_str(&text).is_err());
}

#[test]
fn input_without_data_rows_is_rejected() {
    for (text, expected_line) in [("", 1), ("x,y\n", 1), ("\n\nx,y\n\n", 4)] {
        match read_str(text) {
            Err(HeartError::Parse { line, message, .. }) => {
                assert_eq!(line, expected_line, "{text:?}");
                assert!(message.contains("no coordinate rows"));
            }
            other => panic!("expected parse error for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn write_uses_header_and_six_decimals_by_default() {
    let text = written(
        &[Point2D::new(1.0, -0.5), Point2D::new(16.0, 5.0)],
        &WriteOptions::default(),
    );
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["x,y", "1.000000,-0.500000", "16.000000,5.000000"]);
}

#[test]
fn close_loop_repeats_first_point() {
    let pts = [Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0)];
    let opts = WriteOptions {
        close_loop: true,
        ..WriteOptions::default()
    };
    let text = written(&pts, &opts);
    let back = read_str(&text).unwrap();
    assert_eq!(back.len(), 3);
    assert_eq!(back[0], back[2]);

    assert_eq!(written(&[], &opts), "x,y\n");
}

#[test]
fn shortest_precision_is_exact() {
    let pts = [
        Point2D::new(std::f64::consts::PI, -1.0 / 3.0),
        Point2D::new(1e-12, 123456.789),
    ];
    let opts = WriteOptions {
        precision: Precision::Shortest,
        close_loop: false,
    };
    assert_eq!(read_str(&written(&pts, &opts)).unwrap(), pts);
}

#[test]
fn fixed_precision_round_trips_within_tolerance() {
    let pts: Vec<Point2D> = (0..200)
        .map(|i| {
            let t = i as f64 * 0.173;
            Point2D::new(16.0 * t.sin().powi(3), 13.0 * t.cos() - 1.0 / 7.0)
        })
        .collect();
    let back = read_str(&written(&pts, &WriteOptions::default())).unwrap();
    assert_eq!(back.len(), pts.len());
    for (a, b) in pts.iter().zip(&back) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-6);
    }
}

#[test]
fn write_rejects_non_finite_points_before_touching_disk() {
    let dir = PathBuf::from("target").join("unit_store");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("never_created.txt");
    let _ = std::fs::remove_file(&path);

    let err = write(&path, &[Point2D::new(f64::NAN, 0.0)]).unwrap_err();
    assert!(matches!(err, HeartError::InvalidArgument(_)));
    assert!(!path.exists());
}

#[test]
fn write_into_missing_directory_is_io_error() {
    let path = PathBuf::from("target")
        .join("unit_store")
        .join("no_such_dir")
        .join("coords.txt");
    let err = write(&path, &[Point2D::new(0.0, 0.0)]).unwrap_err();
    match err {
        HeartError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_missing_file_is_io_error() {
    let err = read("target/unit_store/definitely_missing.txt").unwrap_err();
    assert!(matches!(err, HeartError::Io { .. }), "{err}");
}
