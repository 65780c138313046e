use super::*;
use crate::generators::random::SequenceRng;

#[test]
fn advance_wraps_and_stays_in_unit_range() {
    let mut p = Particle::new(0.99, Polarity::Forward);
    p.advance(0.02);
    assert!((p.t() - 0.01).abs() < 1e-12);

    let mut q = Particle::new(0.0, Polarity::Reverse);
    for _ in 0..100_000 {
        q.advance(0.008);
        assert!(q.t() >= 0.0 && q.t() < 1.0);
    }
}

#[test]
fn constructor_wraps_out_of_range_inputs() {
    assert_eq!(Particle::new(1.0, Polarity::Forward).t(), 0.0);
    assert!((Particle::new(2.25, Polarity::Forward).t() - 0.25).abs() < 1e-12);
    assert!((Particle::new(-0.25, Polarity::Forward).t() - 0.75).abs() < 1e-12);
    assert_eq!(Particle::new(-1e-20, Polarity::Forward).t(), 0.0);
    assert_eq!(Particle::new(f64::INFINITY, Polarity::Forward).t(), 0.0);
}

#[test]
fn spawn_spaces_evenly_with_drawn_polarity() {
    let mut rng = SequenceRng::new(vec![0.9, 0.1, 0.6, 0.4]);
    let ps = spawn_particles(4, &mut rng);
    let ts: Vec<f64> = ps.iter().map(|p| p.t()).collect();
    assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75]);
    assert_eq!(ps[0].polarity, Polarity::Forward);
    assert_eq!(ps[1].polarity, Polarity::Reverse);
    assert_eq!(ps[0].polarity.flipped(), Polarity::Reverse);
    assert_ne!(Polarity::Forward.marker(), Polarity::Reverse.marker());
}

#[test]
fn head_window_is_exclusive() {
    let ps = [Particle::new(0.45, Polarity::Forward)];
    assert!(!any_within(&ps, 0.45, 0.55));
    let ps = [Particle::new(0.5, Polarity::Forward)];
    assert!(any_within(&ps, 0.45, 0.55));
}
