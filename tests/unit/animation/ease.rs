use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn progress_outside_unit_range_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn default_is_cubic_in_out() {
    assert_eq!(Ease::default(), Ease::InOutCubic);
    let parsed: Ease = serde_json::from_str("\"in_out_cubic\"").unwrap();
    assert_eq!(parsed, Ease::InOutCubic);
}
