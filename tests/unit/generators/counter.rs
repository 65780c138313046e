use super::*;

#[test]
fn durability_table_is_one_based_and_clamped() {
    assert_eq!(DURABILITY.label(0), None);
    assert_eq!(DURABILITY.label(1), Some("99%"));
    assert_eq!(DURABILITY.label(3), Some("99.99%"));
    assert_eq!(DURABILITY.label(5), Some("99.999999999%"));
    assert_eq!(DURABILITY.label(50), Some("99.999999999%"));
    assert_eq!(DURABILITY.len(), 5);
}

#[test]
fn counter_saturates_and_resets() {
    let mut rpm = Counter::new(0).with_ceiling(7200);
    for _ in 0..17 {
        rpm.add(400);
    }
    assert_eq!(rpm.value(), 6800);
    assert!(!rpm.is_saturated());
    assert_eq!(rpm.add(400), 7200);
    assert_eq!(rpm.add(400), 7200);
    assert!(rpm.is_saturated());
    rpm.reset();
    assert_eq!(rpm.value(), 0);
}

#[test]
fn ramp_hits_max_exactly() {
    let steps = ramp_steps(400, 7200);
    assert_eq!(steps.len(), 18);
    assert_eq!(steps[0], 400);
    assert_eq!(*steps.last().unwrap(), 7200);
    assert!(steps.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(ramp_steps(500, 1200), vec![500, 1000, 1200]);
    assert!(ramp_steps(0, 10).is_empty());
}

#[test]
fn byte_labels_switch_units() {
    assert_eq!(format_bytes(512), "512 bytes");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(3 * 1_048_576), "3.0 MB");
    assert_eq!(format_tape_bytes(1016), "Bytes: 1016");
    assert_eq!(format_tape_bytes(2048), "Bytes: 2.0K");
}
