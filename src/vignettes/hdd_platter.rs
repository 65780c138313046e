//! Era 3: a spinning platter with a seeking read/write arm.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::{Affine, ElementId, Point, Vec2};
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::palette;
use crate::generators::counter::{Counter, format_bytes, ramp_steps};
use crate::generators::random::{SharedRng, draw, draw_index};
use crate::lifecycle::Vignette;
use crate::surface::{Surface, SurfaceExt};
use crate::timeline::task::{Repeat, ScheduledTask};
use crate::timeline::track::Track;
use crate::vignettes::{canvas, group, label};

/// Spindle center.
pub const CENTER: Point = Point::new(200.0, 160.0);
/// Radii of the data tracks, outermost first.
pub const TRACK_RADII: [f64; 4] = [85.0, 70.0, 55.0, 40.0];

const RPM_STEP: u64 = 400;
const RPM_MAX: u64 = 7200;
const RPM_INTERVAL_MS: f64 = 100.0;
const ROTATION_STEP_DEG: u32 = 3;
const WRITE_EVERY_DEG: u32 = 15;
const WRITE_MS: f64 = 50.0;
const SECTOR_BYTES: u64 = 512;
const FIRST_SEEK_MS: f64 = 800.0;

/// Domains laid out on track `track`.
pub fn domains_on_track(track: usize) -> usize {
    20 + track * 6
}

/// One arm movement: where to, how long the drive reports, and when to seek again.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SeekPlan {
    /// Chosen data track.
    pub track: usize,
    /// Arm tip height for that track.
    pub target_y: f64,
    /// Reported seek time; the arm moves for `seek_ms * 20`.
    pub seek_ms: u64,
    /// Delay before the next seek.
    pub next_in_ms: f64,
}

impl SeekPlan {
    /// Draw a seek: random track, 5–14ms seek time, next seek 1–2.5s later.
    pub fn pick(rng: &SharedRng) -> Self {
        let track = draw_index(rng, TRACK_RADII.len()).unwrap_or_default();
        let seek_ms = (5.0 + draw(rng) * 10.0).floor() as u64;
        let next_in_ms = 1000.0 + draw(rng) * 1500.0;
        Self {
            track,
            target_y: CENTER.y + (track as f64 - 1.5) * 15.0,
            seek_ms,
            next_in_ms,
        }
    }

    /// Arm travel time.
    pub fn travel_ms(&self) -> f64 {
        self.seek_ms as f64 * 20.0
    }
}

#[derive(Debug)]
struct Mounted {
    platter: ElementId,
    domains: Vec<ElementId>,
    arm: ElementId,
    head: ElementId,
    rpm_text: ElementId,
    seek_text: ElementId,
    bytes_text: ElementId,
}

#[derive(Debug)]
struct HddPlay {
    rpm: Counter,
    bytes: Counter,
    degrees: u32,
    seeks: u64,
}

/// Hard disk: spin-up counter, platter rotation with domain writes, arm seeks.
#[derive(Debug, Default)]
pub struct HddPlatter {
    mounted: Option<Mounted>,
    play: Option<Rc<RefCell<HddPlay>>>,
}

impl HddPlatter {
    /// Unmounted vignette.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Vignette for HddPlatter {
    fn era(&self) -> &'static str {
        "hdd"
    }

    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()> {
        let svg = canvas(surface, root, 400.0, 320.0)?;
        let platter = group(surface, svg, &[("transform", Affine::IDENTITY.into())])?;

        let mut domains = Vec::new();
        for (track, radius) in TRACK_RADII.iter().enumerate() {
            let count = domains_on_track(track);
            for i in 0..count {
                let angle = i as f64 / count as f64 * std::f64::consts::TAU;
                let at = CENTER + Vec2::from_angle(angle) * *radius;
                let domain = surface.create_with(
                    platter,
                    "rect",
                    &[
                        ("x", (at.x - 3.0).into()),
                        ("y", (at.y - 1.5).into()),
                        ("width", 6.0.into()),
                        ("height", 3.0.into()),
                        ("fill", palette::CHARCOAL.into()),
                        ("transform", Affine::rotate_about(angle, at).into()),
                    ],
                )?;
                domains.push(domain);
            }
        }

        let arm = surface.create_with(
            svg,
            "line",
            &[
                ("x1", 360.0.into()),
                ("y1", 270.0.into()),
                ("x2", (CENTER.x + 40.0).into()),
                ("y2", CENTER.y.into()),
            ],
        )?;
        let head = group(surface, svg, &[("transform", Affine::IDENTITY.into())])?;
        surface.create_with(
            head,
            "polygon",
            &[
                ("points", "235,154 245,160 235,166".into()),
                ("fill", palette::CORAL.into()),
            ],
        )?;

        self.mounted = Some(Mounted {
            platter,
            domains,
            arm,
            head,
            rpm_text: label(surface, svg, Point::new(50.0, 300.0), palette::TEAL, "0 RPM")?,
            seek_text: label(surface, svg, Point::new(350.0, 300.0), palette::ASH, "Seek: --ms")?,
            bytes_text: label(surface, svg, Point::new(200.0, 300.0), palette::ASH, "0 bytes")?,
        });
        Ok(())
    }

    fn compose(&mut self, _surface: &mut dyn Surface, rng: &SharedRng) -> StrataResult<Vec<Track>> {
        let Some(m) = &self.mounted else {
            return Err(StrataError::validation("hdd platter is not mounted"));
        };
        let play = Rc::new(RefCell::new(HddPlay {
            rpm: Counter::new(0).with_ceiling(RPM_MAX),
            bytes: Counter::new(0),
            degrees: 0,
            seeks: 0,
        }));
        self.play = Some(play.clone());

        let mut spin_up = Track::new("spin-up");
        for _ in ramp_steps(RPM_STEP, RPM_MAX) {
            let (play, rpm_text) = (play.clone(), m.rpm_text);
            spin_up = spin_up.then(
                ScheduledTask::once(move |ctx| {
                    let rpm = play.borrow_mut().rpm.add(RPM_STEP);
                    ctx.surface.set_text(rpm_text, format!("{rpm} RPM"));
                })
                .delay(RPM_INTERVAL_MS),
            );
        }

        let rotation = {
            let (play, rng) = (play.clone(), rng.clone());
            let (platter, bytes_text) = (m.platter, m.bytes_text);
            let domains = m.domains.clone();
            ScheduledTask::frame(move |ctx| {
                let mut play = play.borrow_mut();
                play.degrees = (play.degrees + ROTATION_STEP_DEG) % 360;
                let turn = Affine::rotate_about(f64::from(play.degrees).to_radians(), CENTER);
                ctx.surface.set_attr(platter, "transform", turn.into());
                if play.degrees % WRITE_EVERY_DEG != 0 {
                    return;
                }
                if let Some(idx) = draw_index(&rng, domains.len()) {
                    let fill = if draw(&rng) > 0.5 { palette::TEAL } else { palette::CORAL };
                    ctx.spawn(
                        Track::new("domain-write")
                            .then(ScheduledTask::tween(WRITE_MS).attr(domains[idx], "fill", fill)),
                    );
                }
                let bytes = play.bytes.add(SECTOR_BYTES);
                ctx.surface.set_text(bytes_text, format_bytes(bytes));
            })
        };

        let seek = {
            let (play, rng) = (play.clone(), rng.clone());
            let (arm, head, seek_text) = (m.arm, m.head, m.seek_text);
            ScheduledTask::periodic(FIRST_SEEK_MS, move |ctx| {
                let plan = SeekPlan::pick(&rng);
                play.borrow_mut().seeks += 1;
                ctx.surface.set_attr(seek_text, "fill", palette::CORAL.into());
                ctx.surface
                    .set_text(seek_text, format!("Seek: {}ms", plan.seek_ms));
                let lift = Affine::translate((0.0, plan.target_y - CENTER.y));
                ctx.spawn(
                    Track::new("arm-seek")
                        .with(
                            ScheduledTask::tween(plan.travel_ms())
                                .attr(arm, "y2", plan.target_y)
                                .on_end(move |ctx| {
                                    ctx.surface.set_attr(seek_text, "fill", palette::TEAL.into());
                                }),
                        )
                        .with(ScheduledTask::tween(plan.travel_ms()).attr(head, "transform", lift)),
                );
                Repeat::After(plan.next_in_ms)
            })
            .delay(FIRST_SEEK_MS)
        };

        Ok(vec![
            spin_up,
            Track::new("rotation").then(rotation),
            Track::new("seek").then(seek),
        ])
    }

    fn clear(&mut self) {
        self.play = None;
    }

    fn counters(&self) -> BTreeMap<&'static str, u64> {
        self.play
            .as_ref()
            .map(|play| {
                let play = play.borrow();
                BTreeMap::from([
                    ("rpm", play.rpm.value()),
                    ("bytes_written", play.bytes.value()),
                    ("seeks", play.seeks),
                ])
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vignettes/hdd_platter.rs"]
mod tests;
