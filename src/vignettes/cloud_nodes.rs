//! Era 5: an object replicating from a primary region to four others.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::foundation::core::{Affine, AttrValue, ElementId, Point};
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::palette;
use crate::generators::counter::{Counter, DURABILITY};
use crate::generators::random::SharedRng;
use crate::lifecycle::Vignette;
use crate::surface::{Surface, SurfaceExt};
use crate::timeline::task::{Repeat, ScheduledTask};
use crate::timeline::track::Track;
use crate::vignettes::{canvas, group, label};

/// A data-center region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Display name.
    pub name: &'static str,
    /// Node center.
    pub at: Point,
}

/// Regions; index 2 holds the original copy.
pub const REGIONS: [Region; 5] = [
    Region { name: "US-East", at: Point::new(90.0, 100.0) },
    Region { name: "EU-West", at: Point::new(320.0, 80.0) },
    Region { name: "Primary", at: Point::new(210.0, 160.0) },
    Region { name: "US-West", at: Point::new(70.0, 210.0) },
    Region { name: "Asia-Pac", at: Point::new(340.0, 190.0) },
];

/// `(source, target, latency_ms)` links. The first four carry replicas out of the primary.
pub const LINKS: [(usize, usize, u64); 6] = [
    (2, 0, 12),
    (2, 1, 85),
    (2, 3, 45),
    (2, 4, 120),
    (0, 1, 73),
    (3, 4, 95),
];

const REPLICAS: usize = 4;
const DEPART_STAGGER_MS: f64 = 350.0;
const LIFT_MS: f64 = 100.0;
const FADE_MS: f64 = 200.0;
const HEARTBEAT_MS: f64 = 2000.0;

/// One replica chunk's trip along a link.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ChunkFlight {
    /// Index into [`LINKS`].
    pub link: usize,
    /// Destination region.
    pub target: usize,
    /// When the chunk lifts off.
    pub depart_ms: f64,
    /// In-flight time, scaled by latency.
    pub flight_ms: f64,
}

impl ChunkFlight {
    /// When the chunk reaches its target.
    pub fn arrival_ms(&self) -> f64 {
        self.depart_ms + LIFT_MS + self.flight_ms
    }
}

/// Flights for every replica link.
pub fn chunk_flights() -> Vec<ChunkFlight> {
    LINKS
        .iter()
        .take(REPLICAS)
        .enumerate()
        .map(|(i, &(_, target, latency))| ChunkFlight {
            link: i,
            target,
            depart_ms: i as f64 * DEPART_STAGGER_MS,
            flight_ms: 400.0 + latency as f64 * 3.0,
        })
        .collect()
}

#[derive(Debug)]
struct Mounted {
    lines: Vec<ElementId>,
    latency_labels: Vec<ElementId>,
    nodes: Vec<ElementId>,
    circles: Vec<ElementId>,
    chunks: Vec<ElementId>,
    replication: ElementId,
    durability: ElementId,
}

#[derive(Debug)]
struct CloudPlay {
    copies: Counter,
}

/// Replication fan-out with latency-scaled flights and a durability readout.
#[derive(Debug, Default)]
pub struct CloudNodes {
    mounted: Option<Rc<Mounted>>,
    play: Option<Rc<RefCell<CloudPlay>>>,
}

impl CloudNodes {
    /// Unmounted vignette.
    pub fn new() -> Self {
        Self::default()
    }
}

fn replication_text(copies: u64) -> String {
    format!("Replication: {copies}/{} regions", REGIONS.len())
}

impl Vignette for CloudNodes {
    fn era(&self) -> &'static str {
        "cloud"
    }

    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()> {
        let svg = canvas(surface, root, 420.0, 300.0)?;
        let mut lines = Vec::with_capacity(LINKS.len());
        let mut latency_labels = Vec::with_capacity(REPLICAS);
        for (i, &(source, target, latency)) in LINKS.iter().enumerate() {
            let (a, b) = (REGIONS[source].at, REGIONS[target].at);
            lines.push(surface.create_with(
                svg,
                "line",
                &[
                    ("x1", a.x.into()),
                    ("y1", a.y.into()),
                    ("x2", b.x.into()),
                    ("y2", b.y.into()),
                    ("stroke", palette::OXIDE.into()),
                    ("stroke-width", 1.5.into()),
                    ("opacity", 0.3.into()),
                ],
            )?);
            if i < REPLICAS {
                let mid = a.midpoint(b);
                let text = label(
                    surface,
                    svg,
                    Point::new(mid.x, mid.y - 5.0),
                    palette::STONE,
                    &format!("{latency}ms"),
                )?;
                surface.set_attr(text, "opacity", 0.0.into());
                latency_labels.push(text);
            }
        }

        let mut nodes = Vec::with_capacity(REGIONS.len());
        let mut circles = Vec::with_capacity(REGIONS.len());
        for region in &REGIONS {
            let node = group(
                surface,
                svg,
                &[("transform", Affine::translate(region.at.to_vec2()).into())],
            )?;
            circles.push(surface.create_with(
                node,
                "circle",
                &[
                    ("r", 22.0.into()),
                    ("fill", palette::GATE.into()),
                    ("stroke", palette::GATE_EDGE.into()),
                    ("stroke-width", 2.0.into()),
                ],
            )?);
            nodes.push(node);
        }

        let chunks = chunk_flights()
            .iter()
            .map(|flight| {
                let from = REGIONS[LINKS[flight.link].0].at;
                surface.create_with(
                    svg,
                    "rect",
                    &[
                        ("x", (from.x - 5.0).into()),
                        ("y", (from.y - 5.0).into()),
                        ("width", 10.0.into()),
                        ("height", 10.0.into()),
                        ("fill", palette::TEAL.into()),
                        ("opacity", 0.0.into()),
                    ],
                )
            })
            .collect::<StrataResult<Vec<_>>>()?;

        let replication = label(surface, svg, Point::new(210.0, 265.0), palette::FOG, &replication_text(1))?;
        let durability = label(
            surface,
            svg,
            Point::new(210.0, 285.0),
            palette::STONE,
            "Durability: calculating...",
        )?;

        self.mounted = Some(Rc::new(Mounted {
            lines,
            latency_labels,
            nodes,
            circles,
            chunks,
            replication,
            durability,
        }));
        Ok(())
    }

    fn compose(&mut self, _surface: &mut dyn Surface, _rng: &SharedRng) -> StrataResult<Vec<Track>> {
        let Some(m) = self.mounted.clone() else {
            return Err(StrataError::validation("cloud nodes are not mounted"));
        };
        let play = Rc::new(RefCell::new(CloudPlay {
            copies: Counter::new(1).with_ceiling(1 + REPLICAS as u64),
        }));
        self.play = Some(play.clone());

        let mut labels = Track::new("latency-labels");
        for (i, text) in m.latency_labels.iter().enumerate() {
            labels = labels.with(
                ScheduledTask::tween(300.0)
                    .delay(i as f64 * 200.0)
                    .attr(*text, "opacity", 1.0),
            );
        }

        let mut links = Track::new("links");
        for (i, line) in m.lines.iter().enumerate() {
            links = links.with(
                ScheduledTask::tween(300.0)
                    .delay(i as f64 * 150.0)
                    .attr(*line, "opacity", 0.8)
                    .attr(*line, "stroke", palette::TEAL),
            );
        }

        let mut tracks = vec![labels, links];
        let mut arrivals = Track::new("arrivals");
        for (flight, chunk) in chunk_flights().into_iter().zip(m.chunks.iter().copied()) {
            let to = REGIONS[flight.target].at;
            tracks.push(
                Track::new("chunk")
                    .then(
                        ScheduledTask::tween(LIFT_MS)
                            .delay(flight.depart_ms)
                            .attr(chunk, "opacity", 1.0),
                    )
                    .then(
                        ScheduledTask::tween(flight.flight_ms)
                            .ease(Ease::InOutCubic)
                            .attr(chunk, "x", to.x - 5.0)
                            .attr(chunk, "y", to.y - 5.0),
                    )
                    .then(ScheduledTask::tween(FADE_MS).attr(chunk, "opacity", 0.0)),
            );

            let (m, play) = (m.clone(), play.clone());
            arrivals = arrivals.with(
                ScheduledTask::once(move |ctx| {
                    let copies = play.borrow_mut().copies.add(1);
                    arrive(ctx, &m, flight.target, copies);
                })
                .delay(flight.arrival_ms()),
            );
        }
        tracks.push(arrivals);
        Ok(tracks)
    }

    fn clear(&mut self) {
        self.play = None;
    }

    fn counters(&self) -> BTreeMap<&'static str, u64> {
        self.play
            .as_ref()
            .map(|play| BTreeMap::from([("copies", play.borrow().copies.value())]))
            .unwrap_or_default()
    }
}

/// A replica landed on `target`, bringing the total to `copies`.
fn arrive(ctx: &mut crate::timeline::task::TaskCtx<'_>, m: &Mounted, target: usize, copies: u64) {
    let node = m.nodes[target];
    let circle = m.circles[target];
    match ctx.surface.create(node, "rect") {
        Ok(replica) => {
            for (name, value) in [
                ("x", AttrValue::Number(-7.0)),
                ("y", AttrValue::Number(-7.0)),
                ("width", AttrValue::Number(14.0)),
                ("height", AttrValue::Number(14.0)),
                ("fill", palette::TEAL.into()),
                ("opacity", AttrValue::Number(0.0)),
            ] {
                ctx.surface.set_attr(replica, name, value);
            }
            ctx.spawn(
                Track::new("replica-fade")
                    .then(ScheduledTask::tween(300.0).attr(replica, "opacity", 1.0)),
            );
        }
        Err(err) => tracing::warn!(error = %err, target, "could not place replica marker"),
    }

    ctx.surface.set_attr(circle, "filter", "url(#node-glow)".into());
    ctx.spawn(
        Track::new("node-pulse")
            .then(ScheduledTask::tween(300.0).attr(circle, "fill", palette::GATE_CHARGED))
            .then(ScheduledTask::tween(300.0).attr(circle, "fill", palette::GATE)),
    );

    if copies < 1 + REPLICAS as u64 {
        ctx.surface.set_text(m.replication, replication_text(copies));
        let nines = DURABILITY.label(copies as usize).unwrap_or_default();
        ctx.surface
            .set_text(m.durability, format!("Durability: {nines}"));
        return;
    }

    ctx.surface
        .set_text(m.replication, format!("✓ Replicated to {copies} regions"));
    ctx.spawn(
        Track::new("replicated")
            .then(ScheduledTask::tween(300.0).attr(m.replication, "fill", palette::TEAL)),
    );
    ctx.surface.set_attr(m.durability, "fill", palette::TEAL.into());
    ctx.surface
        .set_text(m.durability, "Durability: 99.999999999% (11 nines)");

    let circles = m.circles.clone();
    ctx.spawn(
        Track::new("heartbeat").then(
            ScheduledTask::periodic(HEARTBEAT_MS, move |ctx| {
                for circle in &circles {
                    ctx.spawn(
                        Track::new("beat")
                            .then(
                                ScheduledTask::tween(400.0)
                                    .attr(*circle, "stroke-width", 4.0)
                                    .attr(*circle, "stroke", palette::TEAL),
                            )
                            .then(
                                ScheduledTask::tween(600.0)
                                    .attr(*circle, "stroke-width", 2.0)
                                    .attr(*circle, "stroke", palette::GATE_EDGE),
                            ),
                    );
                }
                Repeat::Again
            })
            .delay(HEARTBEAT_MS),
        ),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/vignettes/cloud_nodes.rs"]
mod tests;
