//! Measurement outcomes and aggregated shot counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{SimError, SimResult};

/// One classical readout produced by a single shot.
///
/// Bit `k` of [`value`](Outcome::value) is classical bit `k`. The string form
/// puts the highest classical bit first, so `"01"` means clbit 0 read 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    value: u64,
    width: usize,
}

impl Outcome {
    /// Create an outcome from a classical register value.
    pub fn new(value: u64, width: usize) -> Self {
        Self { value, width }
    }

    /// Integer value of the classical register.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of classical bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Value of classical bit `k`.
    pub fn bit(&self, k: usize) -> bool {
        (self.value >> k) & 1 == 1
    }

    /// The outcome as a bit string, highest classical bit first.
    pub fn to_bitstring(&self) -> String {
        bitstring(self.value, self.width)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bitstring())
    }
}

fn bitstring(value: u64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{value:0width$b}")
}

/// Outcome counts over every bit string of a fixed width.
///
/// All `2^width` keys are present from construction, so outcomes that never
/// occur still report zero. Keys iterate in ascending order
/// (`"00"`, `"01"`, `"10"`, `"11"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, u64>",
    into = "BTreeMap<String, u64>"
)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Create zero-filled counts for `width` classical bits.
    pub fn zeroed(width: usize) -> Self {
        let counts = (0..1u64 << width)
            .map(|v| (bitstring(v, width), 0))
            .collect();
        Self { counts }
    }

    /// Width of every key, in bits.
    pub fn width(&self) -> usize {
        self.counts.keys().next().map_or(0, String::len)
    }

    /// Record one shot. The outcome must have the same width as the keys.
    pub fn record(&mut self, outcome: &Outcome) -> SimResult<()> {
        self.check_width(outcome.width())?;
        self.insert(outcome.to_bitstring(), 1);
        Ok(())
    }

    /// Add `count` observations of `bitstring`. Callers guarantee the key
    /// is one of the zero-filled ones.
    pub(crate) fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for a bit string (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The most frequent bit string; ties go to the first in canonical order.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .fold(None, |best: Option<(&str, u64)>, (k, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((k, v)),
            })
    }

    /// Relative frequency of every key. Empty totals give all zeros.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total();
        self.counts
            .iter()
            .map(|(k, &v)| {
                let p = if total == 0 {
                    0.0
                } else {
                    v as f64 / total as f64
                };
                (k.clone(), p)
            })
            .collect()
    }

    /// Combine two partial tallies of the same width.
    pub fn merge(mut self, other: Counts) -> SimResult<Self> {
        self.check_width(other.width())?;
        for (k, v) in other.counts {
            self.insert(k, v);
        }
        Ok(self)
    }

    fn check_width(&self, width: usize) -> SimResult<()> {
        if width != self.width() {
            return Err(SimError::InvalidCounts(format!(
                "{width}-bit outcome does not fit {}-bit counts",
                self.width()
            )));
        }
        Ok(())
    }
}

impl TryFrom<BTreeMap<String, u64>> for Counts {
    type Error = SimError;

    /// Accepts only a complete key set: every bit string of one width.
    fn try_from(counts: BTreeMap<String, u64>) -> SimResult<Self> {
        let width = counts.keys().next().map_or(0, String::len);
        if counts.is_empty() || width > 63 {
            return Err(SimError::InvalidCounts(format!(
                "expected all bit strings of one width, got {} keys",
                counts.len()
            )));
        }
        let valid = counts.len() as u64 == 1u64 << width
            && counts
                .keys()
                .all(|k| k.len() == width && k.chars().all(|c| c == '0' || c == '1'));
        if !valid {
            return Err(SimError::InvalidCounts(format!(
                "keys are not the {} bit strings of width {width}",
                1u64 << width
            )));
        }
        Ok(Self { counts })
    }
}

impl From<Counts> for BTreeMap<String, u64> {
    fn from(counts: Counts) -> Self {
        counts.counts
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{k}': {v}")?;
        }
        write!(f, "}}")
    }
}

/// Result of executing a circuit on the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_bitstring_is_big_endian() {
        let o = Outcome::new(0b01, 2);
        assert_eq!(o.to_bitstring(), "01");
        assert!(o.bit(0));
        assert!(!o.bit(1));
        assert_eq!(format!("{}", Outcome::new(6, 3)), "110");
    }

    #[test]
    fn test_zeroed_has_all_keys_in_order() {
        let counts = Counts::zeroed(2);
        let keys: Vec<_> = counts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["00", "01", "10", "11"]);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.width(), 2);
    }

    #[test]
    fn test_zero_width_has_single_empty_key() {
        let mut counts = Counts::zeroed(0);
        assert_eq!(counts.len(), 1);
        counts.record(&Outcome::new(0, 0)).unwrap();
        assert_eq!(counts.get(""), 1);
    }

    #[test]
    fn test_record_and_get() {
        let mut counts = Counts::zeroed(2);
        counts.record(&Outcome::new(3, 2)).unwrap();
        counts.record(&Outcome::new(3, 2)).unwrap();
        counts.record(&Outcome::new(1, 2)).unwrap();

        assert_eq!(counts.get("11"), 2);
        assert_eq!(counts.get("01"), 1);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.most_frequent(), Some(("11", 2)));
    }

    #[test]
    fn test_most_frequent_tie_prefers_canonical_first() {
        let counts = Counts::zeroed(1);
        assert_eq!(counts.most_frequent(), Some(("0", 0)));
    }

    #[test]
    fn test_probabilities() {
        let mut counts = Counts::zeroed(1);
        counts.insert("0", 1);
        counts.insert("1", 3);
        let probs = counts.probabilities();
        assert!((probs["0"] - 0.25).abs() < 1e-12);
        assert!((probs["1"] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_merge() {
        let mut a = Counts::zeroed(1);
        a.insert("0", 2);
        let mut b = Counts::zeroed(1);
        b.insert("1", 5);
        let merged = a.merge(b).unwrap();
        assert_eq!(merged.get("0"), 2);
        assert_eq!(merged.get("1"), 5);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_rejects_other_width() {
        let a = Counts::zeroed(1);
        assert!(matches!(
            a.merge(Counts::zeroed(2)),
            Err(SimError::InvalidCounts(_))
        ));
    }

    #[test]
    fn test_record_rejects_other_width() {
        let mut counts = Counts::zeroed(2);
        assert!(matches!(
            counts.record(&Outcome::new(5, 3)),
            Err(SimError::InvalidCounts(_))
        ));
        assert_eq!(counts.len(), 4);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_deserialize_rejects_foreign_keys() {
        for json in [
            r#"{}"#,
            r#"{"0":1}"#,
            r#"{"0":1,"1":0,"2":0}"#,
            r#"{"0":1,"x":0}"#,
            r#"{"00":1,"01":0,"10":0,"111":0}"#,
        ] {
            assert!(serde_json::from_str::<Counts>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_counts_serialize_as_map() {
        let mut counts = Counts::zeroed(1);
        counts.insert("1", 4);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"0":0,"1":4}"#);
        let back: Counts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }

    #[test]
    fn test_counts_display() {
        let mut counts = Counts::zeroed(1);
        counts.insert("0", 3);
        assert_eq!(format!("{counts}"), "{'0': 3, '1': 0}");
    }
}
