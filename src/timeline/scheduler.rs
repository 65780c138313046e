use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use serde::Serialize;

use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::foundation::core::AttrValue;
use crate::surface::Surface;
use crate::timeline::task::{PeriodicFn, Repeat, TaskCtx, TaskFn, TaskKind, Tween, TweenTarget};
use crate::timeline::track::Track;

/// Shortest interval between two runs of a periodic task.
const MIN_PERIOD_MS: f64 = 1.0;

/// Handle to one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TaskHandle(u64);

/// Handle to the tracks submitted by a single [`Scheduler::submit`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ProgramHandle(u64);

/// What one [`Scheduler::advance`] call did.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AdvanceReport {
    /// Programs whose last bounded task finished during this advance, in finishing order.
    pub completed: Vec<ProgramHandle>,
    /// Timed events dispatched (starts, finishes, periodic runs).
    pub events: usize,
    /// Frame-task invocations.
    pub frames: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EventKind {
    Start,
    Finish,
    Repeat,
}

impl EventKind {
    /// Tweens landing at an instant settle before anything starts at that instant.
    fn phase(self) -> u8 {
        match self {
            Self::Finish => 0,
            Self::Start | Self::Repeat => 1,
        }
    }
}

#[derive(Debug)]
struct Event {
    at_ms: f64,
    seq: u64,
    task: TaskHandle,
    kind: EventKind,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at_ms
            .total_cmp(&other.at_ms)
            .then(self.kind.phase().cmp(&other.kind.phase()))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

enum Body {
    Tween {
        tweens: Vec<Tween>,
        from: Vec<Option<AttrValue>>,
    },
    Once(TaskFn),
    Frame {
        body: TaskFn,
        runs: u64,
    },
    Periodic {
        period_ms: f64,
        body: PeriodicFn,
        runs: u64,
    },
}

struct Slot {
    program: ProgramHandle,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
    gates_completion: bool,
    body: Body,
    on_end: Option<TaskFn>,
}

#[derive(Debug, Default)]
struct Program {
    remaining: usize,
    complete: bool,
}

/// Cooperative virtual-time scheduler.
///
/// Events are ordered by `(time, submission order)`, so tasks due at the same instant run in
/// the order they were scheduled; tweens finishing at an instant land before anything starts
/// at it. Within one [`advance`](Self::advance): due events run first,
/// then in-flight tweens are written at the current time, then frame tasks run once.
#[derive(Default)]
pub struct Scheduler {
    now_ms: f64,
    slots: BTreeMap<TaskHandle, Slot>,
    events: BinaryHeap<Reverse<Event>>,
    programs: BTreeMap<ProgramHandle, Program>,
    tweening: BTreeSet<TaskHandle>,
    framing: BTreeSet<TaskHandle>,
    deferred: Vec<ProgramHandle>,
    next_task: u64,
    next_program: u64,
    next_seq: u64,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms)
            .field("tasks", &self.slots.len())
            .field("events", &self.events.len())
            .field("programs", &self.programs)
            .finish()
    }
}

impl Scheduler {
    /// Empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the latest advance.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule `tracks` as one program starting at `now_ms`.
    ///
    /// All start times are fixed here. A program without bounded tasks is complete at once.
    pub fn submit(&mut self, now_ms: f64, tracks: Vec<Track>) -> ProgramHandle {
        let program = ProgramHandle(self.next_program);
        self.next_program += 1;
        self.programs.insert(program, Program::default());

        for track in tracks {
            self.place(program, now_ms, track, true);
        }

        if let Some(state) = self.programs.get_mut(&program)
            && state.remaining == 0
        {
            state.complete = true;
        }
        tracing::debug!(
            program = program.0,
            at_ms = now_ms,
            tasks = self.pending(program),
            "submitted program"
        );
        program
    }

    fn place(&mut self, program: ProgramHandle, origin_ms: f64, track: Track, gates: bool) {
        let offsets = track.start_offsets();
        let (name, _, tasks) = track.into_parts();
        for (task, offset) in tasks.into_iter().zip(offsets) {
            let Some(offset) = offset else {
                tracing::warn!(track = %name, "task chained after an unbounded task never starts");
                continue;
            };
            let gates_completion = gates && task.kind.is_bounded();
            let duration_ms = task.duration_ms();
            let body = match task.kind {
                TaskKind::Tween(tweens) => Body::Tween {
                    from: Vec::new(),
                    tweens,
                },
                TaskKind::Once(body) => Body::Once(body),
                TaskKind::Frame(body) => Body::Frame { body, runs: 0 },
                TaskKind::Periodic { period_ms, body } => Body::Periodic {
                    period_ms,
                    body,
                    runs: 0,
                },
            };
            let handle = TaskHandle(self.next_task);
            self.next_task += 1;
            let start_ms = origin_ms + offset;
            self.slots.insert(
                handle,
                Slot {
                    program,
                    start_ms,
                    duration_ms,
                    ease: task.ease,
                    gates_completion,
                    body,
                    on_end: task.on_end,
                },
            );
            if gates_completion && let Some(state) = self.programs.get_mut(&program) {
                state.remaining += 1;
            }
            self.push_event(start_ms, handle, EventKind::Start);
        }
    }

    fn push_event(&mut self, at_ms: f64, task: TaskHandle, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Reverse(Event {
            at_ms,
            seq,
            task,
            kind,
        }));
    }

    /// Move time to `now_ms` and run everything that became due.
    ///
    /// Time never runs backwards; an earlier `now_ms` is treated as the current time.
    pub fn advance(&mut self, now_ms: f64, surface: &mut dyn Surface) -> AdvanceReport {
        let now_ms = if now_ms.is_finite() { now_ms.max(self.now_ms) } else { self.now_ms };
        let mut report = AdvanceReport {
            completed: std::mem::take(&mut self.deferred),
            ..AdvanceReport::default()
        };

        while let Some(Reverse(next)) = self.events.peek() {
            if next.at_ms > now_ms {
                break;
            }
            let Some(Reverse(event)) = self.events.pop() else {
                break;
            };
            if !self.slots.contains_key(&event.task) {
                continue;
            }
            report.events += 1;
            self.dispatch(event, surface, &mut report);
        }
        self.now_ms = now_ms;

        let tweening: Vec<TaskHandle> = self.tweening.iter().copied().collect();
        for handle in tweening {
            if let Some(slot) = self.slots.get(&handle) {
                let progress = if slot.duration_ms > 0.0 {
                    (now_ms - slot.start_ms) / slot.duration_ms
                } else {
                    1.0
                };
                write_tween(slot, progress, surface);
            }
        }

        let framing: Vec<TaskHandle> = self.framing.iter().copied().collect();
        for handle in framing {
            let mut spawned = Vec::new();
            let Some(slot) = self.slots.get_mut(&handle) else {
                continue;
            };
            let program = slot.program;
            if let Body::Frame { body, runs } = &mut slot.body {
                let mut ctx = TaskCtx::new(now_ms, *runs, surface, &mut spawned);
                body(&mut ctx);
                *runs += 1;
                report.frames += 1;
            }
            self.adopt(program, now_ms, spawned);
        }

        report
    }

    fn dispatch(&mut self, event: Event, surface: &mut dyn Surface, report: &mut AdvanceReport) {
        let at_ms = event.at_ms;
        let handle = event.task;
        match event.kind {
            EventKind::Start => self.start(handle, at_ms, surface, report),
            EventKind::Finish => {
                if let Some(slot) = self.slots.get(&handle) {
                    write_tween(slot, 1.0, surface);
                }
                self.finish(handle, at_ms, surface, report);
            }
            EventKind::Repeat => self.run_periodic(handle, at_ms, surface, report),
        }
    }

    fn start(
        &mut self,
        handle: TaskHandle,
        at_ms: f64,
        surface: &mut dyn Surface,
        report: &mut AdvanceReport,
    ) {
        let Some(slot) = self.slots.get_mut(&handle) else {
            return;
        };
        let program = slot.program;
        match &mut slot.body {
            Body::Tween { tweens, from } => {
                *from = tweens
                    .iter()
                    .map(|tween| surface.attr(tween.element, &tween.attr))
                    .collect();
                if slot.duration_ms > 0.0 {
                    let end_ms = at_ms + slot.duration_ms;
                    self.tweening.insert(handle);
                    self.push_event(end_ms, handle, EventKind::Finish);
                } else {
                    write_tween(slot, 1.0, surface);
                    self.finish(handle, at_ms, surface, report);
                }
            }
            Body::Once(body) => {
                let mut spawned = Vec::new();
                body(&mut TaskCtx::new(at_ms, 0, surface, &mut spawned));
                self.adopt(program, at_ms, spawned);
                self.finish(handle, at_ms, surface, report);
            }
            Body::Frame { .. } => {
                self.framing.insert(handle);
            }
            Body::Periodic { .. } => self.run_periodic(handle, at_ms, surface, report),
        }
    }

    fn run_periodic(
        &mut self,
        handle: TaskHandle,
        at_ms: f64,
        surface: &mut dyn Surface,
        report: &mut AdvanceReport,
    ) {
        let Some(slot) = self.slots.get_mut(&handle) else {
            return;
        };
        let program = slot.program;
        let Body::Periodic {
            period_ms,
            body,
            runs,
        } = &mut slot.body
        else {
            return;
        };
        let mut spawned = Vec::new();
        let repeat = body(&mut TaskCtx::new(at_ms, *runs, surface, &mut spawned));
        *runs += 1;
        let period_ms = *period_ms;
        self.adopt(program, at_ms, spawned);

        match repeat {
            Repeat::Again => {
                self.push_event(at_ms + period_ms.max(MIN_PERIOD_MS), handle, EventKind::Repeat);
            }
            Repeat::After(ms) if ms.is_finite() => {
                self.push_event(at_ms + ms.max(MIN_PERIOD_MS), handle, EventKind::Repeat);
            }
            Repeat::After(_) | Repeat::Stop => self.finish(handle, at_ms, surface, report),
        }
    }

    fn finish(
        &mut self,
        handle: TaskHandle,
        at_ms: f64,
        surface: &mut dyn Surface,
        report: &mut AdvanceReport,
    ) {
        self.tweening.remove(&handle);
        self.framing.remove(&handle);
        let Some(slot) = self.slots.remove(&handle) else {
            return;
        };
        if let Some(mut hook) = slot.on_end {
            let mut spawned = Vec::new();
            hook(&mut TaskCtx::new(at_ms, 0, surface, &mut spawned));
            self.adopt(slot.program, at_ms, spawned);
        }
        if slot.gates_completion && self.settle(slot.program) {
            tracing::debug!(program = slot.program.0, at_ms, "program complete");
            report.completed.push(slot.program);
        }
    }

    /// Count one gating task as done; `true` when that completes the program.
    fn settle(&mut self, program: ProgramHandle) -> bool {
        let Some(state) = self.programs.get_mut(&program) else {
            return false;
        };
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining == 0 && !state.complete {
            state.complete = true;
            return true;
        }
        false
    }

    fn adopt(&mut self, program: ProgramHandle, at_ms: f64, spawned: Vec<Track>) {
        if !self.programs.contains_key(&program) {
            // The program was cancelled from inside its own callback.
            return;
        }
        for track in spawned {
            self.place(program, at_ms, track, false);
        }
    }

    /// Cancel one task. Returns `false` when it already finished or was cancelled.
    ///
    /// A cancelled task stops gating its program; completion caused by that is reported by
    /// the next [`advance`](Self::advance).
    pub fn cancel_task(&mut self, handle: TaskHandle) -> bool {
        self.tweening.remove(&handle);
        self.framing.remove(&handle);
        let Some(slot) = self.slots.remove(&handle) else {
            return false;
        };
        if slot.gates_completion && self.settle(slot.program) {
            self.deferred.push(slot.program);
        }
        true
    }

    /// Cancel every outstanding task of `program`, spawned ones included. Returns how many
    /// tasks were dropped. Completion hooks of dropped tasks never run.
    pub fn cancel_program(&mut self, program: ProgramHandle) -> usize {
        let doomed: Vec<TaskHandle> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.program == program)
            .map(|(handle, _)| *handle)
            .collect();
        for handle in &doomed {
            self.slots.remove(handle);
            self.tweening.remove(handle);
            self.framing.remove(handle);
        }
        self.programs.remove(&program);
        self.deferred.retain(|p| *p != program);
        if !doomed.is_empty() {
            tracing::debug!(program = program.0, tasks = doomed.len(), "cancelled program");
        }
        doomed.len()
    }

    /// Outstanding tasks of `program`.
    pub fn pending(&self, program: ProgramHandle) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.program == program)
            .count()
    }

    /// Outstanding tasks across all programs.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether every bounded task of `program` has finished. Unknown (or cancelled) programs
    /// are not complete.
    pub fn is_complete(&self, program: ProgramHandle) -> bool {
        self.programs.get(&program).is_some_and(|state| state.complete)
    }

    /// Handles of the outstanding tasks of `program`, in submission order.
    pub fn tasks_of(&self, program: ProgramHandle) -> Vec<TaskHandle> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.program == program)
            .map(|(handle, _)| *handle)
            .collect()
    }
}

fn write_tween(slot: &Slot, progress: f64, surface: &mut dyn Surface) {
    let Body::Tween { tweens, from } = &slot.body else {
        return;
    };
    let progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 1.0 };
    let eased = slot.ease.apply(progress);
    let done = progress >= 1.0;
    for (index, tween) in tweens.iter().enumerate() {
        let value = match &tween.target {
            TweenTarget::To(to) if done => to.clone(),
            TweenTarget::To(to) => match from.get(index).and_then(Option::as_ref) {
                Some(start) => <AttrValue as Lerp>::lerp(start, to, eased),
                None => continue,
            },
            TweenTarget::Label { from, to, format } => {
                let number = if done { *to } else { <f64 as Lerp>::lerp(from, to, eased) };
                AttrValue::Text(format(number))
            }
        };
        surface.set_attr(tween.element, &tween.attr, value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;
