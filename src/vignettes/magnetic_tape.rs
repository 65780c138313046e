//! Era 2: reel-to-reel tape with magnetic particles passing a read head.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::{Affine, AttrValue, ElementId, Point};
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::palette;
use crate::generators::counter::{Counter, format_tape_bytes};
use crate::generators::particle::{Particle, any_within, spawn_particles};
use crate::generators::random::SharedRng;
use crate::lifecycle::Vignette;
use crate::path::PathModel;
use crate::surface::{Surface, SurfaceExt};
use crate::timeline::task::ScheduledTask;
use crate::timeline::track::Track;
use crate::vignettes::{canvas, group, label};

/// Supply reel exit, over the first guide roller, under the read head, over the second
/// roller, into the take-up reel.
pub const TAPE_PATH: [Point; 5] = [
    Point::new(95.0, 75.0),
    Point::new(150.0, 88.0),
    Point::new(200.0, 200.0),
    Point::new(250.0, 88.0),
    Point::new(305.0, 90.0),
];

const SUPPLY_REEL: Point = Point::new(85.0, 120.0);
const TAKEUP_REEL: Point = Point::new(315.0, 120.0);

const PARTICLES: usize = 12;
const FADE_STAGGER_MS: f64 = 60.0;
const FADE_MS: f64 = 200.0;
const TRANSPORT_DELAY_MS: f64 = 300.0;
const SUPPLY_STEP_DEG: f64 = 1.5;
const TAKEUP_STEP_DEG: f64 = 2.0;
const PARTICLE_STEP: f64 = 0.008;
/// Open interval of path positions the read head sees.
pub const HEAD_WINDOW: (f64, f64) = (0.45, 0.55);
const BYTES_PER_FRAME: u64 = 8;

#[derive(Debug)]
struct Mounted {
    path: PathModel,
    supply: ElementId,
    takeup: ElementId,
    read_light: ElementId,
    read_text: ElementId,
    counter: ElementId,
    /// Particle groups with their marker rect.
    particles: Vec<(ElementId, ElementId)>,
}

#[derive(Debug)]
struct TapePlay {
    particles: Vec<Particle>,
    supply_deg: f64,
    takeup_deg: f64,
    bytes: Counter,
    frames_at_head: u64,
}

/// Tape transport: reels turn, particles flow along the tape, the head counts bytes.
#[derive(Debug, Default)]
pub struct MagneticTape {
    mounted: Option<Mounted>,
    play: Option<Rc<RefCell<TapePlay>>>,
}

impl MagneticTape {
    /// Unmounted vignette.
    pub fn new() -> Self {
        Self::default()
    }
}

fn at(p: Point) -> AttrValue {
    Affine::translate(p.to_vec2()).into()
}

impl Vignette for MagneticTape {
    fn era(&self) -> &'static str {
        "tape"
    }

    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()> {
        let path = PathModel::from_points(&TAPE_PATH)?;
        let svg = canvas(surface, root, 400.0, 300.0)?;
        let identity: AttrValue = Affine::IDENTITY.into();
        let supply = group(surface, svg, &[("transform", identity.clone())])?;
        let takeup = group(surface, svg, &[("transform", identity.clone())])?;
        let read_light = surface.create_with(
            svg,
            "circle",
            &[
                ("cx", 200.0.into()),
                ("cy", 228.0.into()),
                ("r", 4.0.into()),
                ("fill", palette::CHARCOAL.into()),
            ],
        )?;
        let read_text = label(surface, svg, Point::new(200.0, 255.0), palette::STONE, "READ/WRITE")?;
        let counter = label(surface, svg, Point::new(200.0, 285.0), palette::ASH, "Bytes: 0")?;

        let layer = group(surface, svg, &[])?;
        let particles = (0..PARTICLES)
            .map(|_| -> StrataResult<(ElementId, ElementId)> {
                let g = group(
                    surface,
                    layer,
                    &[("opacity", 0.0.into()), ("transform", identity.clone())],
                )?;
                let marker = surface.create_with(
                    g,
                    "rect",
                    &[
                        ("x", (-4.0).into()),
                        ("y", (-2.0).into()),
                        ("width", 8.0.into()),
                        ("height", 4.0.into()),
                        ("fill", palette::FOG.into()),
                    ],
                )?;
                Ok((g, marker))
            })
            .collect::<StrataResult<Vec<_>>>()?;

        self.mounted = Some(Mounted {
            path,
            supply,
            takeup,
            read_light,
            read_text,
            counter,
            particles,
        });
        Ok(())
    }

    fn compose(&mut self, surface: &mut dyn Surface, rng: &SharedRng) -> StrataResult<Vec<Track>> {
        let Some(m) = &self.mounted else {
            return Err(StrataError::validation("magnetic tape is not mounted"));
        };
        let particles = spawn_particles(m.particles.len(), &mut **rng.borrow_mut());
        let mut fade = Track::new("particle-fade");
        for (i, (particle, (g, marker))) in particles.iter().zip(&m.particles).enumerate() {
            surface.set_attr(*marker, "fill", particle.polarity.marker().into());
            surface.set_attr(*g, "transform", at(m.path.resolve(particle.t())));
            fade = fade.with(
                ScheduledTask::tween(FADE_MS)
                    .delay(i as f64 * FADE_STAGGER_MS)
                    .attr(*g, "opacity", 1.0),
            );
        }

        let play = Rc::new(RefCell::new(TapePlay {
            particles,
            supply_deg: 0.0,
            takeup_deg: 0.0,
            bytes: Counter::new(0),
            frames_at_head: 0,
        }));
        self.play = Some(play.clone());

        let path = m.path.clone();
        let groups: Vec<ElementId> = m.particles.iter().map(|(g, _)| *g).collect();
        let (supply, takeup) = (m.supply, m.takeup);
        let (read_light, read_text, counter) = (m.read_light, m.read_text, m.counter);
        let transport = ScheduledTask::frame(move |ctx| {
            let mut play = play.borrow_mut();
            play.supply_deg += SUPPLY_STEP_DEG;
            play.takeup_deg += TAKEUP_STEP_DEG;
            let supply_turn = Affine::rotate_about(play.supply_deg.to_radians(), SUPPLY_REEL);
            let takeup_turn = Affine::rotate_about(play.takeup_deg.to_radians(), TAKEUP_REEL);
            ctx.surface.set_attr(supply, "transform", supply_turn.into());
            ctx.surface.set_attr(takeup, "transform", takeup_turn.into());

            for (particle, g) in play.particles.iter_mut().zip(&groups) {
                particle.advance(PARTICLE_STEP);
                ctx.surface.set_attr(*g, "transform", at(path.resolve(particle.t())));
            }

            if any_within(&play.particles, HEAD_WINDOW.0, HEAD_WINDOW.1) {
                play.frames_at_head += 1;
                let bytes = play.bytes.add(BYTES_PER_FRAME);
                ctx.surface.set_attr(read_light, "fill", palette::TEAL.into());
                ctx.surface.set_attr(read_text, "fill", palette::TEAL.into());
                ctx.surface.set_text(counter, format_tape_bytes(bytes));
            } else {
                ctx.surface.set_attr(read_light, "fill", palette::CHARCOAL.into());
                ctx.surface.set_attr(read_text, "fill", palette::STONE.into());
            }
        })
        .delay(TRANSPORT_DELAY_MS);

        Ok(vec![fade, Track::new("transport").then(transport)])
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
                    ("bytes_read", play.bytes.value()),
                    ("frames_at_head", play.frames_at_head),
                ])
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vignettes/magnetic_tape.rs"]
mod tests;
