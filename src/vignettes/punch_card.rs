//! Era 1: holes punched into a card, light shining through.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::{AttrValue, ElementId, Point};
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::palette;
use crate::generators::counter::Counter;
use crate::generators::random::SharedRng;
use crate::generators::selection::select_cells;
use crate::lifecycle::Vignette;
use crate::surface::{Surface, SurfaceExt};
use crate::timeline::task::{Repeat, ScheduledTask};
use crate::timeline::track::Track;
use crate::vignettes::{canvas, label};

const COLS: usize = 12;
const ROWS: usize = 5;
const HOLE_SIZE: f64 = 16.0;
const SPACING: f64 = 28.0;
const GRID_ORIGIN: Point = Point::new(50.0, 65.0);

const PUNCH_THRESHOLD: f64 = 0.55;
const REVEAL_STEP_MS: f64 = 40.0;
const PUNCH_MS: f64 = 150.0;
const CLICK_MARKERS: usize = 5;

/// Center of grid cell `index` (row-major).
pub fn hole_center(index: usize) -> Point {
    let row = index / COLS;
    let col = index % COLS;
    Point::new(
        GRID_ORIGIN.x + col as f64 * SPACING,
        GRID_ORIGIN.y + row as f64 * SPACING,
    )
}

#[derive(Debug)]
struct PunchPlay {
    punched: Counter,
    selected: u64,
}

/// 12×5 punch card; a random subset of holes is punched on every play.
#[derive(Debug, Default)]
pub struct PunchCard {
    canvas: Option<ElementId>,
    holes: Vec<ElementId>,
    counter: Option<ElementId>,
    play: Option<Rc<RefCell<PunchPlay>>>,
}

impl PunchCard {
    /// Unmounted vignette.
    pub fn new() -> Self {
        Self::default()
    }

    fn hole_rect(at: Point) -> [(&'static str, AttrValue); 4] {
        [
            ("x", (at.x - HOLE_SIZE / 2.0).into()),
            ("y", (at.y - HOLE_SIZE / 2.0).into()),
            ("width", HOLE_SIZE.into()),
            ("height", (HOLE_SIZE * 0.6).into()),
        ]
    }
}

impl Vignette for PunchCard {
    fn era(&self) -> &'static str {
        "punch"
    }

    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()> {
        let svg = canvas(surface, root, 400.0, 280.0)?;
        self.holes = (0..COLS * ROWS)
            .map(|index| -> StrataResult<ElementId> {
                let hole = surface.create_with(svg, "rect", &Self::hole_rect(hole_center(index)))?;
                surface.set_attr(hole, "fill", palette::CARD_HOLE.into());
                surface.set_attr(hole, "stroke", palette::CARD_HOLE_EDGE.into());
                Ok(hole)
            })
            .collect::<StrataResult<Vec<_>>>()?;
        self.counter = Some(label(
            surface,
            svg,
            Point::new(200.0, 265.0),
            palette::ASH,
            "Holes punched: 0",
        )?);
        self.canvas = Some(svg);
        Ok(())
    }

    fn compose(&mut self, surface: &mut dyn Surface, rng: &SharedRng) -> StrataResult<Vec<Track>> {
        let (Some(svg), Some(counter)) = (self.canvas, self.counter) else {
            return Err(StrataError::validation("punch card is not mounted"));
        };
        let cells = select_cells(
            self.holes.len(),
            PUNCH_THRESHOLD,
            REVEAL_STEP_MS,
            &mut **rng.borrow_mut(),
        );
        let selected = cells.len() as u64;
        let play = Rc::new(RefCell::new(PunchPlay {
            punched: Counter::new(0).with_ceiling(selected),
            selected,
        }));
        self.play = Some(play.clone());

        let mut tracks = Vec::with_capacity(cells.len() * 2 + CLICK_MARKERS);
        for cell in &cells {
            let hole = self.holes[cell.index];
            let center = hole_center(cell.index);
            let play = play.clone();
            tracks.push(
                Track::new("punch").then(
                    ScheduledTask::tween(PUNCH_MS)
                        .delay(cell.delay_ms)
                        .attr(hole, "fill", palette::INK)
                        .attr(hole, "stroke", palette::BLACK)
                        .on_end(move |ctx| {
                            let n = play.borrow_mut().punched.add(1);
                            ctx.surface.set_text(counter, format!("Holes punched: {n}"));
                        }),
                ),
            );

            let ray = surface.create_with(svg, "rect", &Self::hole_rect(center))?;
            surface.set_attr(ray, "fill", palette::AMBER.into());
            surface.set_attr(ray, "filter", "url(#glow)".into());
            surface.set_attr(ray, "opacity", 0.0.into());
            tracks.push(
                Track::new("light-ray")
                    .then(
                        ScheduledTask::tween(200.0)
                            .delay(cell.delay_ms + PUNCH_MS)
                            .attr(ray, "opacity", 0.9),
                    )
                    .then(ScheduledTask::tween(500.0).attr(ray, "opacity", 0.6))
                    .then(ScheduledTask::tween(500.0).attr(ray, "opacity", 0.9))
                    .then(ScheduledTask::periodic(1600.0, move |ctx| {
                        ctx.spawn(
                            Track::new("light-pulse")
                                .then(ScheduledTask::tween(800.0).attr(ray, "opacity", 0.5))
                                .then(ScheduledTask::tween(800.0).attr(ray, "opacity", 0.9)),
                        );
                        Repeat::Again
                    })),
            );
        }

        for (i, cell) in cells.iter().take(CLICK_MARKERS).enumerate() {
            let center = hole_center(cell.index);
            let click = label(
                surface,
                svg,
                Point::new(center.x, center.y - 15.0),
                palette::CORAL,
                "CLICK",
            )?;
            surface.set_attr(click, "opacity", 0.0.into());
            tracks.push(
                Track::new("click")
                    .then(
                        ScheduledTask::tween(100.0)
                            .delay(i as f64 * 200.0)
                            .attr(click, "opacity", 1.0),
                    )
                    .then(
                        ScheduledTask::tween(300.0)
                            .delay(200.0)
                            .attr(click, "opacity", 0.0)
                            .attr(click, "y", center.y - 25.0),
                    ),
            );
        }

        tracing::debug!(selected, "punch card composed");
        Ok(tracks)
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
                    ("holes_punched", play.punched.value()),
                    ("holes_selected", play.selected),
                ])
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vignettes/punch_card.rs"]
mod tests;
