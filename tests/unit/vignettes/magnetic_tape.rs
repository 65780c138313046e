use super::*;
use crate::vignettes::testing::{mounted, rng, run};

#[test]
fn tape_path_is_a_valid_model() {
    let path = PathModel::from_points(&TAPE_PATH).unwrap();
    assert_eq!(path.segments().len(), 4);
    assert_eq!(path.start_point(), TAPE_PATH[0]);
    assert_eq!(path.resolve(1.0), TAPE_PATH[4]);
}

#[test]
fn markers_follow_polarity() {
    let mut tape = MagneticTape::new();
    let (mut surface, _) = mounted(&mut tape);
    tape.compose(&mut surface, &rng(&[0.9, 0.1])).unwrap();
    let m = tape.mounted.as_ref().unwrap();
    let fills: Vec<_> = m
        .particles
        .iter()
        .map(|(_, marker)| surface.attr(*marker, "fill"))
        .collect();
    assert_eq!(fills[0], Some(AttrValue::Color(palette::CORAL)));
    assert_eq!(fills[1], Some(AttrValue::Color(palette::TEAL)));
    assert_eq!(fills.len(), PARTICLES);
}

#[test]
fn transport_waits_then_runs() {
    let mut tape = MagneticTape::new();
    let (mut surface, _) = mounted(&mut tape);
    let tracks = tape.compose(&mut surface, &rng(&[0.5])).unwrap();
    let supply = tape.mounted.as_ref().unwrap().supply;

    let mut scheduler = crate::timeline::scheduler::Scheduler::new();
    scheduler.submit(0.0, tracks);
    scheduler.advance(290.0, &mut surface);
    assert_eq!(
        surface.attr(supply, "transform"),
        Some(AttrValue::Transform(Affine::IDENTITY))
    );
    assert_eq!(tape.counters()["bytes_read"], 0);

    scheduler.advance(300.0, &mut surface);
    let expected = Affine::rotate_about(SUPPLY_STEP_DEG.to_radians(), SUPPLY_REEL);
    assert_eq!(
        surface.attr(supply, "transform"),
        Some(AttrValue::Transform(expected))
    );
}

#[test]
fn head_counts_bytes_while_particles_pass() {
    let mut tape = MagneticTape::new();
    let (mut surface, _) = mounted(&mut tape);
    let tracks = tape.compose(&mut surface, &rng(&[0.5])).unwrap();
    run(&mut surface, tracks, 2000.0);

    let counters = tape.counters();
    assert!(counters["frames_at_head"] > 0);
    assert_eq!(counters["bytes_read"], counters["frames_at_head"] * BYTES_PER_FRAME);
    let m = tape.mounted.as_ref().unwrap();
    assert_eq!(
        surface.text(m.counter),
        Some(format_tape_bytes(counters["bytes_read"]))
    );
    // Twelve particles spaced 1/12 apart always leave one inside the 0.1-wide window.
    assert_eq!(
        surface.attr(m.read_light, "fill"),
        Some(AttrValue::Color(palette::TEAL))
    );
    let play = tape.play.as_ref().unwrap().borrow();
    assert!(play.particles.iter().all(|p| (0.0..1.0).contains(&p.t())));
}

#[test]
fn all_particles_fade_in() {
    let mut tape = MagneticTape::new();
    let (mut surface, _) = mounted(&mut tape);
    let tracks = tape.compose(&mut surface, &rng(&[0.5])).unwrap();
    run(&mut surface, tracks, 900.0);
    let m = tape.mounted.as_ref().unwrap();
    assert!(m
        .particles
        .iter()
        .all(|(g, _)| surface.number(*g, "opacity") == Some(1.0)));
}
