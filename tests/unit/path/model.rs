use super::*;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

fn l_shape() -> PathModel {
    // 30 units right, then 10 units down.
    PathModel::from_points(&[
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(30.0, 10.0),
    ])
    .unwrap()
}

#[test]
fn intervals_are_proportional_to_length() {
    let path = l_shape();
    assert_eq!(path.total_length(), 40.0);
    let segs = path.segments();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].start_t, 0.0);
    assert_eq!(segs[0].end_t, 0.75);
    assert_eq!(segs[1].start_t, 0.75);
    assert_eq!(segs[1].end_t, 1.0);
}

#[test]
fn intervals_partition_unit_range() {
    let path = PathModel::from_points(&[
        Point::new(95.0, 75.0),
        Point::new(150.0, 88.0),
        Point::new(200.0, 200.0),
        Point::new(250.0, 88.0),
        Point::new(305.0, 90.0),
    ])
    .unwrap();
    let segs = path.segments();
    assert_eq!(segs[0].start_t, 0.0);
    for w in segs.windows(2) {
        assert_eq!(w[0].end_t, w[1].start_t);
        assert!(w[0].start_t <= w[0].end_t);
    }
    assert_eq!(segs[segs.len() - 1].end_t, 1.0);
}

#[test]
fn resolve_interpolates_within_segments() {
    let path = l_shape();
    assert!(close(path.resolve(0.0), Point::new(0.0, 0.0)));
    assert!(close(path.resolve(0.375), Point::new(15.0, 0.0)));
    assert!(close(path.resolve(0.75), Point::new(30.0, 0.0)));
    assert!(close(path.resolve(0.875), Point::new(30.0, 5.0)));
}

#[test]
fn out_of_range_clamps_to_final_point() {
    let path = l_shape();
    let end = Point::new(30.0, 10.0);
    assert_eq!(path.resolve(1.0), end);
    assert_eq!(path.resolve(1.0000001), end);
    assert_eq!(path.resolve(-0.1), end);
    assert_eq!(path.resolve(f64::NAN), end);
}

#[test]
fn zero_length_segment_is_skipped() {
    let path = PathModel::from_points(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
    ])
    .unwrap();
    assert_eq!(path.segments()[1].start_t, path.segments()[1].end_t);
    assert!(close(path.resolve(0.5), Point::new(10.0, 0.0)));
    assert!(close(path.resolve(0.75), Point::new(15.0, 0.0)));
}

#[test]
fn degenerate_paths_are_rejected() {
    assert!(PathModel::from_points(&[Point::new(1.0, 1.0)]).is_err());
    assert!(PathModel::from_points(&[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]).is_err());
    assert!(PathModel::from_segments(Vec::new()).is_err());
    assert!(PathModel::from_points(&[Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]).is_err());
}
