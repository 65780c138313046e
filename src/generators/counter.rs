/// Monotonic counter behind a progress label (holes punched, bytes written, RPM, replicas).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Counter {
    initial: u64,
    value: u64,
    ceiling: Option<u64>,
}

impl Counter {
    /// Counter starting (and resetting) at `initial`.
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            value: initial,
            ceiling: None,
        }
    }

    /// Clamp every future value to `ceiling`.
    pub fn with_ceiling(mut self, ceiling: u64) -> Self {
        self.ceiling = Some(ceiling.max(self.initial));
        self
    }

    /// Current value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// `true` once the ceiling has been reached.
    pub fn is_saturated(&self) -> bool {
        self.ceiling.is_some_and(|c| self.value >= c)
    }

    /// Add `n`, saturating at the ceiling; returns the new value.
    pub fn add(&mut self, n: u64) -> u64 {
        let next = self.value.saturating_add(n);
        self.value = match self.ceiling {
            Some(c) => next.min(c),
            None => next,
        };
        self.value
    }

    /// Restore the initial value.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }
}

/// Finite ordered label table indexed by a 1-based count.
///
/// Counts past the end clamp to the last entry; zero has no label.
#[derive(Clone, Copy, Debug)]
pub struct LabelTable {
    entries: &'static [&'static str],
}

impl LabelTable {
    /// Wrap a static table.
    pub const fn new(entries: &'static [&'static str]) -> Self {
        Self { entries }
    }

    /// Label for `count`, clamped at the last entry.
    pub fn label(&self, count: usize) -> Option<&'static str> {
        if count == 0 || self.entries.is_empty() {
            return None;
        }
        let idx = (count - 1).min(self.entries.len() - 1);
        Some(self.entries[idx])
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` for an empty table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replica count to durability.
pub const DURABILITY: LabelTable = LabelTable::new(&[
    "99%",
    "99.9%",
    "99.99%",
    "99.999%",
    "99.999999999%",
]);

/// Successive counter values from `step` up to and including `max`.
pub fn ramp_steps(step: u64, max: u64) -> Vec<u64> {
    if step == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut v = 0u64;
    while v < max {
        v = v.saturating_add(step).min(max);
        out.push(v);
    }
    out
}

/// Disk-style byte label: `bytes`, then `KB`, then `MB` with one decimal.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

/// Tape-counter byte label: raw bytes below 1 KiB, then `K` with one decimal.
pub fn format_tape_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("Bytes: {bytes}")
    } else {
        format!("Bytes: {:.1}K", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generators/counter.rs"]
mod tests;
