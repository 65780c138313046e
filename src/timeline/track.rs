use crate::timeline::task::{Chain, ScheduledTask};

/// Ordered tasks sharing one start reference.
///
/// Tasks added with [`Track::then`] chain after the preceding task; tasks added with
/// [`Track::with`] hang off the track start. [`Track::push`] keeps whatever chaining the task
/// already carries.
#[derive(Debug, Default)]
pub struct Track {
    name: String,
    base_delay_ms: f64,
    tasks: Vec<ScheduledTask>,
}

impl Track {
    /// Empty track; the name shows up in logs only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_delay_ms: 0.0,
            tasks: Vec::new(),
        }
    }

    /// Offset of the track start from the moment it is submitted.
    pub fn base_delay(mut self, ms: f64) -> Self {
        self.base_delay_ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
        self
    }

    /// Append a task that starts after the preceding one finishes.
    pub fn then(self, task: ScheduledTask) -> Self {
        self.push(task.sequential())
    }

    /// Append a task that starts relative to the track start.
    pub fn with(self, task: ScheduledTask) -> Self {
        self.push(task.parallel())
    }

    /// Append a task as-is.
    pub fn push(mut self, task: ScheduledTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start offset.
    pub fn base_delay_ms(&self) -> f64 {
        self.base_delay_ms
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// `true` for a track without tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Start offsets of every task relative to submission, `None` for tasks that can never
    /// start because they chain after an unbounded task.
    pub fn start_offsets(&self) -> Vec<Option<f64>> {
        let origin = self.base_delay_ms;
        let mut cursor = Some(origin);
        self.tasks
            .iter()
            .map(|task| {
                let start = match task.chain {
                    Chain::Sequential => cursor.map(|end| end + task.delay_ms),
                    Chain::Parallel => Some(origin + task.delay_ms),
                };
                cursor = match start {
                    Some(at) if task.kind.is_bounded() => Some(at + task.duration_ms()),
                    _ => None,
                };
                start
            })
            .collect()
    }

    /// Offset at which the last bounded task finishes, if the track has any.
    pub fn span_ms(&self) -> Option<f64> {
        self.start_offsets()
            .into_iter()
            .zip(&self.tasks)
            .filter(|(_, task)| task.kind.is_bounded())
            .filter_map(|(start, task)| start.map(|at| at + task.duration_ms()))
            .reduce(f64::max)
    }

    pub(crate) fn into_parts(self) -> (String, f64, Vec<ScheduledTask>) {
        (self.name, self.base_delay_ms, self.tasks)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/track.rs"]
mod tests;
