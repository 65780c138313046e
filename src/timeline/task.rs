use crate::animation::ease::Ease;
use crate::foundation::core::{AttrValue, ElementId};
use crate::surface::Surface;
use crate::timeline::track::Track;

/// Callback body for one-shot, per-frame, and completion hooks.
pub type TaskFn = Box<dyn FnMut(&mut TaskCtx<'_>)>;

/// Callback body for periodic tasks; the return value schedules (or stops) the next run.
pub type PeriodicFn = Box<dyn FnMut(&mut TaskCtx<'_>) -> Repeat>;

/// What a periodic task wants after a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Repeat {
    /// Run again after the task's own period.
    Again,
    /// Run again after this many milliseconds.
    After(f64),
    /// Stop for good.
    Stop,
}

/// How a task's start time is derived within its track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Chain {
    /// Start `delay` after the preceding task in the track finishes.
    #[default]
    Sequential,
    /// Start `delay` after the track starts, independent of siblings.
    Parallel,
}

/// End value of one tweened attribute.
#[derive(Clone, Debug)]
pub enum TweenTarget {
    /// Interpolate from the value found when the tween starts to this value.
    To(AttrValue),
    /// Drive a text attribute through `format(lerp(from, to, progress))`.
    Label {
        /// Start number.
        from: f64,
        /// End number.
        to: f64,
        /// Number to display text.
        format: fn(f64) -> String,
    },
}

/// One attribute of one element driven by a tween task.
#[derive(Clone, Debug)]
pub struct Tween {
    /// Target element.
    pub element: ElementId,
    /// Attribute name.
    pub attr: String,
    /// End value.
    pub target: TweenTarget,
}

/// Execution substrate of a task.
pub enum TaskKind {
    /// Timed interpolation of element attributes over `duration_ms`.
    Tween(Vec<Tween>),
    /// Delay-then-mutate.
    Once(TaskFn),
    /// Runs on every frame tick until cancelled.
    Frame(TaskFn),
    /// Runs at start and then every `period_ms` until it returns [`Repeat::Stop`] or is
    /// cancelled.
    Periodic {
        /// Default interval between runs.
        period_ms: f64,
        /// Body.
        body: PeriodicFn,
    },
}

impl TaskKind {
    /// Bounded tasks finish on their own and gate program completion.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Tween(_) | Self::Once(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Tween(_) => "tween",
            Self::Once(_) => "once",
            Self::Frame(_) => "frame",
            Self::Periodic { .. } => "periodic",
        }
    }
}

impl std::fmt::Debug for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tween(tweens) => f.debug_tuple("Tween").field(tweens).finish(),
            Self::Periodic { period_ms, .. } => f
                .debug_struct("Periodic")
                .field("period_ms", period_ms)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}

/// A single time-bounded (or explicitly unbounded) mutation.
///
/// Built with the constructors below and refined builder-style:
/// `ScheduledTask::tween(300.0).attr(dot, "opacity", 1.0).delay(150.0)`.
pub struct ScheduledTask {
    pub(crate) delay_ms: f64,
    pub(crate) duration_ms: f64,
    pub(crate) ease: Ease,
    pub(crate) chain: Chain,
    pub(crate) kind: TaskKind,
    pub(crate) on_end: Option<TaskFn>,
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("delay_ms", &self.delay_ms)
            .field("duration_ms", &self.duration_ms)
            .field("ease", &self.ease)
            .field("chain", &self.chain)
            .field("kind", &self.kind)
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

impl ScheduledTask {
    fn with_kind(kind: TaskKind) -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms: 0.0,
            ease: Ease::default(),
            chain: Chain::default(),
            kind,
            on_end: None,
        }
    }

    /// Attribute transition lasting `duration_ms`; add targets with [`Self::attr`].
    pub fn tween(duration_ms: f64) -> Self {
        let mut task = Self::with_kind(TaskKind::Tween(Vec::new()));
        task.duration_ms = sanitize_ms(duration_ms);
        task
    }

    /// One-shot mutation.
    pub fn once(body: impl FnMut(&mut TaskCtx<'_>) + 'static) -> Self {
        Self::with_kind(TaskKind::Once(Box::new(body)))
    }

    /// Continuous per-frame task; only cancellation stops it.
    pub fn frame(body: impl FnMut(&mut TaskCtx<'_>) + 'static) -> Self {
        Self::with_kind(TaskKind::Frame(Box::new(body)))
    }

    /// Repeating task, first run at its start time.
    pub fn periodic(
        period_ms: f64,
        body: impl FnMut(&mut TaskCtx<'_>) -> Repeat + 'static,
    ) -> Self {
        Self::with_kind(TaskKind::Periodic {
            period_ms: sanitize_ms(period_ms),
            body: Box::new(body),
        })
    }

    /// Delay before start (see [`Chain`] for the reference point).
    pub fn delay(mut self, ms: f64) -> Self {
        self.delay_ms = sanitize_ms(ms);
        self
    }

    /// Easing for tween progress.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Start relative to the track start rather than the preceding task.
    pub fn parallel(mut self) -> Self {
        self.chain = Chain::Parallel;
        self
    }

    /// Start after the preceding task (the default).
    pub fn sequential(mut self) -> Self {
        self.chain = Chain::Sequential;
        self
    }

    /// Tween `element.name` towards `value`. Ignored on non-tween tasks.
    pub fn attr(mut self, element: ElementId, name: &str, value: impl Into<AttrValue>) -> Self {
        if let TaskKind::Tween(tweens) = &mut self.kind {
            tweens.push(Tween {
                element,
                attr: name.to_owned(),
                target: TweenTarget::To(value.into()),
            });
        } else {
            tracing::warn!(attr = name, kind = self.kind.name(), "attr() on a non-tween task");
        }
        self
    }

    /// Tween the `text` of `element` through formatted numbers. Ignored on non-tween tasks.
    pub fn label(mut self, element: ElementId, from: f64, to: f64, format: fn(f64) -> String) -> Self {
        if let TaskKind::Tween(tweens) = &mut self.kind {
            tweens.push(Tween {
                element,
                attr: "text".to_owned(),
                target: TweenTarget::Label { from, to, format },
            });
        } else {
            tracing::warn!(kind = self.kind.name(), "label() on a non-tween task");
        }
        self
    }

    /// Hook run right after a bounded task finishes (never for cancelled tasks).
    pub fn on_end(mut self, hook: impl FnMut(&mut TaskCtx<'_>) + 'static) -> Self {
        self.on_end = Some(Box::new(hook));
        self
    }

    /// Delay in milliseconds.
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Active duration in milliseconds; zero for everything but tweens.
    pub fn duration_ms(&self) -> f64 {
        match self.kind {
            TaskKind::Tween(_) => self.duration_ms,
            _ => 0.0,
        }
    }

    /// Chaining mode.
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Substrate.
    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }
}

fn sanitize_ms(ms: f64) -> f64 {
    if ms.is_finite() { ms.max(0.0) } else { 0.0 }
}

/// What a task callback can see and do.
pub struct TaskCtx<'a> {
    /// Scheduler time at which this callback logically runs.
    pub now_ms: f64,
    /// Runs so far for frame and periodic tasks (0 on the first run).
    pub run: u64,
    /// The rendering surface.
    pub surface: &'a mut dyn Surface,
    pub(crate) spawned: &'a mut Vec<Track>,
}

impl<'a> TaskCtx<'a> {
    pub(crate) fn new(
        now_ms: f64,
        run: u64,
        surface: &'a mut dyn Surface,
        spawned: &'a mut Vec<Track>,
    ) -> Self {
        Self {
            now_ms,
            run,
            surface,
            spawned,
        }
    }

    /// Start `track` now, inside the same program.
    ///
    /// Spawned work is cancelled with its program but never gates completion. Tracks spawned
    /// from a frame callback begin on the next tick.
    pub fn spawn(&mut self, track: Track) {
        self.spawned.push(track);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/task.rs"]
mod tests;
