use super::*;
use crate::foundation::core::AttrValue;
use crate::timeline::scheduler::Scheduler;
use crate::vignettes::testing::{mounted, rng};

#[test]
fn schedule_matches_cell_geometry() {
    let schedule = electron_schedule();
    assert_eq!(schedule.len(), 8);
    assert_eq!(schedule[0].start, Point::new(115.0, 139.0));
    assert_eq!(schedule[0].end, Point::new(120.0, 99.0));
    assert_eq!(schedule[0].appear_ms, 600.0);
    assert_eq!(schedule[0].arrive_ms(), 1800.0);
    assert_eq!(schedule[7].start, Point::new(220.0, 139.0));
    assert_eq!(schedule[7].end, Point::new(216.0, 99.0));
    assert_eq!(schedule[7].tunnel_ms, 2040.0);
    assert_eq!(schedule[4].start, schedule[0].start);
}

#[test]
fn programming_sequence_lands() {
    let mut ssd = SsdNand::new();
    let (mut surface, _) = mounted(&mut ssd);
    let tracks = ssd.compose(&mut surface, &rng(&[])).unwrap();
    let m = ssd.mounted.as_ref().unwrap();
    assert_eq!(surface.text(m.status).as_deref(), Some("APPLYING VOLTAGE..."));

    let mut scheduler = Scheduler::new();
    let program = scheduler.submit(0.0, tracks);
    scheduler.advance(250.0, &mut surface);
    assert_eq!(surface.text(m.voltage).as_deref(), Some("10V"));
    scheduler.advance(700.0, &mut surface);
    assert_eq!(surface.text(m.status).as_deref(), Some("PROGRAMMING..."));
    assert_eq!(surface.text(m.voltage).as_deref(), Some("20V"));

    let report = scheduler.advance(3639.0, &mut surface);
    assert!(report.completed.is_empty());
    assert_eq!(surface.text(m.status).as_deref(), Some("✓ PROGRAMMED"));
    assert_eq!(
        surface.text(m.bit).as_deref(),
        Some("State: CHARGED → Bit = 0")
    );
    let report = scheduler.advance(3640.0, &mut surface);
    assert_eq!(report.completed, vec![program]);

    assert_eq!(ssd.counters()["electrons_tunnelled"], 8);
    for (path, electron) in electron_schedule().iter().zip(&m.electrons) {
        assert_eq!(surface.number(*electron, "cx"), Some(path.end.x));
        assert_eq!(surface.number(*electron, "cy"), Some(path.end.y));
        assert_eq!(surface.number(*electron, "opacity"), Some(1.0));
    }
    assert_eq!(
        surface.attr(m.floating_gate, "fill"),
        Some(AttrValue::Color(palette::GATE_CHARGED))
    );
    assert_eq!(
        surface.attr(m.tunnel_oxide, "fill"),
        Some(AttrValue::Color(palette::OXIDE_GLOW))
    );
    assert_eq!(
        surface.attr(m.voltage, "fill"),
        Some(AttrValue::Color(palette::TEAL))
    );
    // Eight periodic pulses stay live, each with a two-step pulse track in flight.
    assert_eq!(scheduler.pending(program), 24);
}

#[test]
fn electrons_hold_still_before_tunnelling() {
    let mut ssd = SsdNand::new();
    let (mut surface, _) = mounted(&mut ssd);
    let tracks = ssd.compose(&mut surface, &rng(&[])).unwrap();
    let mut scheduler = Scheduler::new();
    scheduler.submit(0.0, tracks);
    scheduler.advance(1199.0, &mut surface);
    let m = ssd.mounted.as_ref().unwrap();
    assert_eq!(surface.number(m.electrons[0], "cx"), Some(115.0));
    assert_eq!(surface.number(m.electrons[0], "r"), Some(5.0));
    assert_eq!(ssd.counters()["electrons_tunnelled"], 0);
}
