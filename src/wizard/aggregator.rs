//! Form data aggregator: per-step values and the final merge

use std::collections::BTreeMap;

use serde_json::Value;

/// One step's validated field values, an opaque key-value record.
pub type FieldValues = BTreeMap<String, Value>;

/// Accumulates each step's submitted values keyed by step name.
///
/// Entries survive backward/forward navigation; a step's record is replaced
/// each time the step finishes and purged when the step unmounts.
#[derive(Debug, Default)]
pub struct DataAggregator {
    entries: BTreeMap<String, FieldValues>,
}

impl DataAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or overwrite) a step's values.
    pub fn record(&mut self, name: &str, values: FieldValues) {
        self.entries.insert(name.to_string(), values);
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValues> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValues> {
        self.entries.get(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge of all recorded values in the given step order.
    ///
    /// Later steps win on key collision. Steps without a record contribute
    /// nothing. The caller passes the registry's current order, so the merge
    /// always reflects display order rather than finish order.
    pub fn merged(&self, order: &[&str]) -> FieldValues {
        let mut out = FieldValues::new();
        for name in order {
            if let Some(values) = self.entries.get(*name) {
                for (key, value) in values {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_record_overwrites() {
        let mut agg = DataAggregator::new();
        agg.record("a", values(&[("x", json!(1))]));
        agg.record("a", values(&[("x", json!(2))]));

        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get("a").unwrap()["x"], json!(2));
    }

    #[test]
    fn test_merge_later_step_wins() {
        let mut agg = DataAggregator::new();
        agg.record("a", values(&[("x", json!(1))]));
        agg.record("b", values(&[("x", json!(2)), ("y", json!(3))]));

        let merged = agg.merged(&["a", "b"]);
        assert_eq!(merged, values(&[("x", json!(2)), ("y", json!(3))]));
    }

    #[test]
    fn test_merge_follows_given_order_not_finish_order() {
        let mut agg = DataAggregator::new();
        // "b" finishes first but sits later in display order.
        agg.record("b", values(&[("x", json!("late"))]));
        agg.record("a", values(&[("x", json!("early"))]));

        let merged = agg.merged(&["a", "b"]);
        assert_eq!(merged["x"], json!("late"));
    }

    #[test]
    fn test_merge_skips_unfinished_steps() {
        let mut agg = DataAggregator::new();
        agg.record("a", values(&[("x", json!(1))]));

        let merged = agg.merged(&["a", "never-finished"]);
        assert_eq!(merged, values(&[("x", json!(1))]));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut agg = DataAggregator::new();
        agg.record("a", values(&[("x", json!(1))]));
        agg.record("b", values(&[("y", json!(2))]));

        assert!(agg.remove("a").is_some());
        assert!(agg.get("a").is_none());
        agg.clear();
        assert!(agg.is_empty());
    }
}
