//! Step registry: the ordered set of mounted wizard steps

/// Per-step configuration supplied at registration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepConfig {
    /// Human-readable title shown in the step indicator
    pub title: String,
    /// Stable position assigned at declaration time. Steps mounting in the
    /// same pass land in declared order regardless of call order.
    pub declared_index: usize,
}

impl StepConfig {
    pub fn new(title: &str, declared_index: usize) -> Self {
        Self {
            title: title.to_string(),
            declared_index,
        }
    }
}

/// A mounted step
#[derive(Debug, Clone)]
pub struct StepEntry {
    pub name: String,
    pub config: StepConfig,
    /// Registration sequence number, tie-break for equal declared indices
    seq: usize,
}

/// Ordered registry of mounted steps.
///
/// Display order follows `StepConfig::declared_index`, not registration-call
/// order. Re-registering an existing name updates its config in place and
/// keeps its position.
#[derive(Debug, Default)]
pub struct StepRegistry {
    entries: Vec<StepEntry>,
    next_seq: usize,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Idempotent add. Returns true when the step was newly mounted.
    ///
    /// A duplicate name keeps its original position; the last registration's
    /// config wins.
    pub fn register(&mut self, name: &str, config: StepConfig) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            tracing::debug!(step = name, "duplicate step registration, config updated in place");
            existing.config = config;
            return false;
        }

        let entry = StepEntry {
            name: name.to_string(),
            config,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        // Keep entries sorted by declared index; equal indices stay in
        // registration order.
        let at = self
            .entries
            .iter()
            .position(|e| {
                e.config.declared_index > entry.config.declared_index
                    || (e.config.declared_index == entry.config.declared_index
                        && e.seq > entry.seq)
            })
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
        true
    }

    /// Removes the entry. Returns true when a step was actually unmounted.
    pub fn deregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Ordered list of mounted step names
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[StepEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&StepEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entry_at(&self, index: usize) -> Option<&StepEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}
