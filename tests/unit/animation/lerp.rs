use super::*;

#[test]
fn numbers_and_points_interpolate_linearly() {
    assert_eq!(<f64 as Lerp>::lerp(&0.0, &10.0, 0.25), 2.5);
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 0.0), &Point::new(10.0, 20.0), 0.5);
    assert_eq!(p, Point::new(5.0, 10.0));
}

#[test]
fn colors_round_per_channel() {
    let a = Rgb8::new(0, 0, 0);
    let b = Rgb8::new(255, 100, 1);
    assert_eq!(<Rgb8 as Lerp>::lerp(&a, &b, 0.5), Rgb8::new(128, 50, 1));
    assert_eq!(<Rgb8 as Lerp>::lerp(&a, &b, 1.0), b);
}

#[test]
fn transforms_reach_both_endpoints() {
    let rot = Affine::rotate(1.0);
    assert_eq!(<Affine as Lerp>::lerp(&Affine::IDENTITY, &rot, 0.0), Affine::IDENTITY);
    let end = <Affine as Lerp>::lerp(&Affine::IDENTITY, &rot, 1.0).as_coeffs();
    for (got, want) in end.iter().zip(rot.as_coeffs()) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn text_snaps_at_completion() {
    let a = AttrValue::from("IDLE");
    let b = AttrValue::from("PROGRAMMING...");
    assert_eq!(<AttrValue as Lerp>::lerp(&a, &b, 0.99), a);
    assert_eq!(<AttrValue as Lerp>::lerp(&a, &b, 1.0), b);
}

#[test]
fn mismatched_kinds_snap_at_completion() {
    let a = AttrValue::Number(1.0);
    let b = AttrValue::Color(Rgb8::new(1, 2, 3));
    assert_eq!(<AttrValue as Lerp>::lerp(&a, &b, 0.5), a);
    assert_eq!(<AttrValue as Lerp>::lerp(&a, &b, 1.0), b);
}
