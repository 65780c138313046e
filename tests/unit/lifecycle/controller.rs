use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::{Affine, AttrValue};
use crate::generators::random::{SequenceRng, shared_rng};
use crate::surface::SurfaceExt;
use crate::surface::memory::MemorySurface;
use crate::timeline::task::ScheduledTask;
use crate::timeline::track::Track;

/// Fades one dot in, optionally spins a group forever, optionally fails to compose.
#[derive(Default)]
struct Blink {
    dot: Option<ElementId>,
    spinner: Option<ElementId>,
    spin: bool,
    fail: bool,
    plays: Rc<Cell<u64>>,
}

impl Vignette for Blink {
    fn era(&self) -> &'static str {
        "blink"
    }

    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()> {
        self.dot = Some(surface.create_with(root, "circle", &[("opacity", AttrValue::Number(0.0))])?);
        self.spinner = Some(surface.create_with(
            root,
            "g",
            &[("transform", AttrValue::Transform(Affine::IDENTITY))],
        )?);
        Ok(())
    }

    fn compose(
        &mut self,
        surface: &mut dyn Surface,
        _rng: &SharedRng,
    ) -> StrataResult<Vec<crate::timeline::track::Track>> {
        let (Some(dot), Some(spinner)) = (self.dot, self.spinner) else {
            return Err(StrataError::validation("not mounted"));
        };
        // Play-time element that reset must remove again.
        surface.create(dot, "title")?;
        if self.fail {
            return Err(StrataError::validation("boom"));
        }
        self.plays.set(self.plays.get() + 1);
        let mut tracks =
            vec![Track::new("fade").then(ScheduledTask::tween(300.0).attr(dot, "opacity", 1.0))];
        if self.spin {
            let mut angle = 0.0_f64;
            tracks.push(Track::new("spin").then(ScheduledTask::frame(move |ctx| {
                angle += 3.0;
                ctx.surface.set_attr(
                    spinner,
                    "transform",
                    AttrValue::Transform(Affine::rotate(angle.to_radians())),
                );
            })));
        }
        Ok(tracks)
    }

    fn clear(&mut self) {}

    fn counters(&self) -> BTreeMap<&'static str, u64> {
        BTreeMap::from([("plays", self.plays.get())])
    }
}

fn rng() -> SharedRng {
    shared_rng(SequenceRng::new(vec![0.5]))
}

fn bound(blink: Blink) -> (MemorySurface, Scheduler, Controller) {
    let mut surface = MemorySurface::with_containers(["#viz-blink"]);
    let controller = Controller::bind("#viz-blink", Box::new(blink), &mut surface).unwrap();
    (surface, Scheduler::new(), controller)
}

#[test]
fn bind_fails_without_container() {
    let mut surface = MemorySurface::new();
    let err = Controller::bind("#viz-blink", Box::new(Blink::default()), &mut surface).unwrap_err();
    assert!(err.is_missing_container());
}

#[test]
fn play_runs_once_and_completes() {
    let (mut surface, mut scheduler, mut controller) = bound(Blink::default());
    let rng = rng();
    assert_eq!(controller.state(), LifecycleState::Idle);
    assert!(controller.play(0.0, &mut scheduler, &mut surface, &rng));
    assert_eq!(controller.state(), LifecycleState::Playing);
    assert!(!controller.play(10.0, &mut scheduler, &mut surface, &rng));
    assert_eq!(controller.programs().len(), 1);
    assert_eq!(controller.counters()["plays"], 1);

    let report = scheduler.advance(300.0, &mut surface);
    for program in report.completed {
        assert!(controller.on_program_complete(program));
    }
    assert_eq!(controller.state(), LifecycleState::Complete);
    assert!(!controller.play(400.0, &mut scheduler, &mut surface, &rng));
    assert_eq!(controller.counters()["plays"], 1);
}

#[test]
fn reset_mid_rotation_restores_identity_and_cancels() {
    let (mut surface, mut scheduler, mut controller) = bound(Blink {
        spin: true,
        ..Blink::default()
    });
    let rng = rng();
    let spinner = surface.children(controller.root())[1];
    controller.play(0.0, &mut scheduler, &mut surface, &rng);
    let mut now = 0.0;
    while now < 200.0 {
        now += 16.0;
        scheduler.advance(now, &mut surface);
    }
    assert_ne!(
        surface.attr(spinner, "transform"),
        Some(AttrValue::Transform(Affine::IDENTITY))
    );
    assert!(controller.pending(&scheduler) > 0);

    controller.reset(&mut scheduler, &mut surface);
    assert_eq!(controller.state(), LifecycleState::Idle);
    assert_eq!(controller.pending(&scheduler), 0);
    assert!(scheduler.is_empty());
    assert!(controller.snapshot().differences(&surface).is_empty());

    scheduler.advance(now + 100.0, &mut surface);
    assert_eq!(
        surface.attr(spinner, "transform"),
        Some(AttrValue::Transform(Affine::IDENTITY))
    );
}

#[test]
fn reset_then_play_starts_again() {
    let (mut surface, mut scheduler, mut controller) = bound(Blink::default());
    let rng = rng();
    controller.play(0.0, &mut scheduler, &mut surface, &rng);
    controller.reset(&mut scheduler, &mut surface);
    controller.reset(&mut scheduler, &mut surface);
    assert!(controller.programs().is_empty());
    assert!(controller.play(50.0, &mut scheduler, &mut surface, &rng));
    assert_eq!(controller.counters()["plays"], 2);
}

#[test]
fn compose_failure_restores_and_stays_idle() {
    let (mut surface, mut scheduler, mut controller) = bound(Blink {
        fail: true,
        ..Blink::default()
    });
    assert!(!controller.play(0.0, &mut scheduler, &mut surface, &rng()));
    assert_eq!(controller.state(), LifecycleState::Idle);
    assert!(scheduler.is_empty());
    assert!(controller.snapshot().differences(&surface).is_empty());
}

#[test]
fn completion_of_foreign_program_is_ignored() {
    let (mut surface, mut scheduler, mut controller) = bound(Blink::default());
    let foreign = scheduler.submit(0.0, Vec::new());
    controller.play(0.0, &mut scheduler, &mut surface, &rng());
    assert!(!controller.on_program_complete(foreign));
    assert_eq!(controller.state(), LifecycleState::Playing);
}
