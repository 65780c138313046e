//! Era 4: electrons tunnelling into a floating gate.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::foundation::core::{ElementId, Point};
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::palette;
use crate::generators::random::SharedRng;
use crate::lifecycle::Vignette;
use crate::surface::{Surface, SurfaceExt};
use crate::timeline::task::{Repeat, ScheduledTask};
use crate::timeline::track::Track;
use crate::vignettes::{canvas, label};

const ELECTRONS: usize = 8;
const APPLY_MS: f64 = 500.0;
const PROGRAMMING_AT_MS: f64 = 600.0;
const TUNNEL_AT_MS: f64 = 1200.0;
const PROGRAMMED_AT_MS: f64 = 2500.0;
const ELECTRON_STAGGER_MS: f64 = 120.0;
const APPEAR_MS: f64 = 200.0;
const TUNNEL_MS: f64 = 600.0;

/// Timing and geometry of one electron's trip from the channel into the floating gate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ElectronPath {
    /// Position in the channel.
    pub start: Point,
    /// Resting position in the floating gate.
    pub end: Point,
    /// When the electron appears.
    pub appear_ms: f64,
    /// When it starts tunnelling.
    pub tunnel_ms: f64,
}

impl ElectronPath {
    /// When the tunnelling tween lands.
    pub fn arrive_ms(&self) -> f64 {
        self.tunnel_ms + TUNNEL_MS
    }
}

/// The eight electrons, four columns by two passes.
pub fn electron_schedule() -> Vec<ElectronPath> {
    (0..ELECTRONS)
        .map(|i| {
            let column = (i % 4) as f64;
            let stagger = i as f64 * ELECTRON_STAGGER_MS;
            ElectronPath {
                start: Point::new(115.0 + column * 35.0, 139.0),
                end: Point::new(120.0 + column * 32.0, 99.0),
                appear_ms: PROGRAMMING_AT_MS + stagger,
                tunnel_ms: TUNNEL_AT_MS + stagger,
            }
        })
        .collect()
}

#[derive(Debug)]
struct Mounted {
    voltage: ElementId,
    floating_gate: ElementId,
    tunnel_oxide: ElementId,
    electrons: Vec<ElementId>,
    status: ElementId,
    bit: ElementId,
}

/// NAND cell programming sequence. Deterministic; takes no randomness.
#[derive(Debug, Default)]
pub struct SsdNand {
    mounted: Option<Mounted>,
    tunnelled: Option<Rc<Cell<u64>>>,
}

impl SsdNand {
    /// Unmounted vignette.
    pub fn new() -> Self {
        Self::default()
    }
}

fn pulse(electron: ElementId) -> ScheduledTask {
    ScheduledTask::periodic(2000.0, move |ctx| {
        ctx.spawn(
            Track::new("electron-pulse")
                .then(ScheduledTask::tween(1000.0).attr(electron, "r", 5.0))
                .then(ScheduledTask::tween(1000.0).attr(electron, "r", 4.0)),
        );
        Repeat::Again
    })
}

impl Vignette for SsdNand {
    fn era(&self) -> &'static str {
        "ssd"
    }

    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()> {
        let svg = canvas(surface, root, 400.0, 300.0)?;
        let voltage = label(surface, svg, Point::new(90.0, 75.0), palette::SLATE, "0V")?;
        let floating_gate = surface.create_with(
            svg,
            "rect",
            &[
                ("x", 100.0.into()),
                ("y", 90.0.into()),
                ("width", 140.0.into()),
                ("height", 22.0.into()),
                ("fill", palette::GATE.into()),
                ("stroke", palette::GATE_EDGE.into()),
            ],
        )?;
        let tunnel_oxide = surface.create_with(
            svg,
            "rect",
            &[
                ("x", 100.0.into()),
                ("y", 112.0.into()),
                ("width", 140.0.into()),
                ("height", 8.0.into()),
                ("fill", palette::OXIDE.into()),
            ],
        )?;
        let electrons = electron_schedule()
            .iter()
            .map(|path| {
                surface.create_with(
                    svg,
                    "circle",
                    &[
                        ("cx", path.start.x.into()),
                        ("cy", path.start.y.into()),
                        ("r", 4.0.into()),
                        ("fill", palette::TEAL.into()),
                        ("opacity", 0.0.into()),
                    ],
                )
            })
            .collect::<StrataResult<Vec<_>>>()?;
        let status = label(surface, svg, Point::new(200.0, 265.0), palette::ASH, "IDLE")?;
        let bit = label(
            surface,
            svg,
            Point::new(200.0, 285.0),
            palette::FOG,
            "State: EMPTY → Bit = 1",
        )?;
        self.mounted = Some(Mounted {
            voltage,
            floating_gate,
            tunnel_oxide,
            electrons,
            status,
            bit,
        });
        Ok(())
    }

    fn compose(&mut self, surface: &mut dyn Surface, _rng: &SharedRng) -> StrataResult<Vec<Track>> {
        let Some(m) = &self.mounted else {
            return Err(StrataError::validation("ssd cell is not mounted"));
        };
        let (status, bit) = (m.status, m.bit);
        surface.set_attr(status, "fill", palette::CORAL.into());
        surface.set_text(status, "APPLYING VOLTAGE...");

        let tunnelled = Rc::new(Cell::new(0));
        self.tunnelled = Some(tunnelled.clone());

        let phases = Track::new("status")
            .then(
                ScheduledTask::once(move |ctx| ctx.surface.set_text(status, "PROGRAMMING..."))
                    .delay(PROGRAMMING_AT_MS),
            )
            .then(
                ScheduledTask::once(move |ctx| {
                    ctx.surface.set_attr(status, "fill", palette::TEAL.into());
                    ctx.surface.set_text(status, "✓ PROGRAMMED");
                    ctx.surface.set_attr(bit, "fill", palette::TEAL.into());
                    ctx.surface.set_text(bit, "State: CHARGED → Bit = 0");
                })
                .delay(PROGRAMMED_AT_MS - PROGRAMMING_AT_MS),
            );

        let voltage = Track::new("voltage")
            .then(
                ScheduledTask::tween(APPLY_MS)
                    .label(m.voltage, 0.0, 20.0, |v| format!("{}V", v.round()))
                    .attr(m.voltage, "fill", palette::CORAL),
            )
            .then(
                ScheduledTask::tween(300.0)
                    .delay(PROGRAMMED_AT_MS - APPLY_MS)
                    .attr(m.voltage, "fill", palette::TEAL),
            );

        let oxide = Track::new("tunnel-oxide").then(
            ScheduledTask::tween(300.0)
                .delay(APPLY_MS)
                .attr(m.tunnel_oxide, "fill", palette::OXIDE_GLOW),
        );
        let gate = Track::new("floating-gate").then(
            ScheduledTask::tween(400.0)
                .delay(PROGRAMMED_AT_MS)
                .attr(m.floating_gate, "fill", palette::GATE_CHARGED),
        );

        let mut tracks = vec![phases, voltage, oxide, gate];
        for (path, electron) in electron_schedule().into_iter().zip(m.electrons.iter().copied()) {
            let tunnelled = tunnelled.clone();
            // Late electrons finish tunnelling after the programmed phase and pulse right away.
            let settle_ms = (PROGRAMMED_AT_MS - path.arrive_ms()).max(0.0);
            tracks.push(
                Track::new("electron")
                    .then(
                        ScheduledTask::tween(APPEAR_MS)
                            .delay(path.appear_ms)
                            .attr(electron, "opacity", 1.0)
                            .attr(electron, "r", 5.0),
                    )
                    .then(
                        ScheduledTask::tween(TUNNEL_MS)
                            .delay(path.tunnel_ms - path.appear_ms - APPEAR_MS)
                            .ease(Ease::InOutCubic)
                            .attr(electron, "cx", path.end.x)
                            .attr(electron, "cy", path.end.y)
                            .attr(electron, "r", 4.0)
                            .on_end(move |_| tunnelled.set(tunnelled.get() + 1)),
                    )
                    .then(
                        ScheduledTask::tween(500.0)
                            .delay(settle_ms)
                            .attr(electron, "r", 6.0),
                    )
                    .then(ScheduledTask::tween(500.0).attr(electron, "r", 4.0))
                    .then(pulse(electron)),
            );
        }
        Ok(tracks)
    }

    fn clear(&mut self) {
        self.tunnelled = None;
    }

    fn counters(&self) -> BTreeMap<&'static str, u64> {
        self.tunnelled
            .as_ref()
            .map(|n| BTreeMap::from([("electrons_tunnelled", n.get())]))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vignettes/ssd_nand.rs"]
mod tests;
