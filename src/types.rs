use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::MonrunError;

/// One kind of evidence the detector can use to decide a file changed.
///
/// Ordered from cheapest to most expensive to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// Modification time, from a single metadata call.
    Timestamp,
    /// File length, from the same metadata call.
    Size,
    /// Digest over the whole file content.
    Checksum,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Timestamp, Signal::Size, Signal::Checksum];

    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Timestamp => "timestamp",
            Signal::Size => "size",
            Signal::Checksum => "checksum",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "timestamp" | "time" | "mtime" => Ok(Signal::Timestamp),
            "size" => Ok(Signal::Size),
            "checksum" | "hash" => Ok(Signal::Checksum),
            other => Err(format!(
                "unknown signal \"{other}\" (expected \"timestamp\", \"size\" or \"checksum\")"
            )),
        }
    }
}

/// Non-empty set of enabled [`Signal`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalPolicy {
    signals: BTreeSet<Signal>,
}

impl SignalPolicy {
    /// Build a policy from any collection of signals.
    ///
    /// Duplicates are folded; an empty collection is rejected.
    pub fn new(signals: impl IntoIterator<Item = Signal>) -> Result<Self, MonrunError> {
        let signals: BTreeSet<Signal> = signals.into_iter().collect();
        if signals.is_empty() {
            return Err(MonrunError::InvalidSignal(
                "at least one signal must be enabled".to_string(),
            ));
        }
        Ok(Self { signals })
    }

    /// The `--only-time` policy.
    pub fn timestamp_only() -> Self {
        Self {
            signals: BTreeSet::from([Signal::Timestamp]),
        }
    }

    /// Parse signal names such as `["timestamp", "checksum"]`.
    pub fn parse_names<I, S>(names: I) -> Result<Self, MonrunError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signals = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Signal>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(MonrunError::InvalidSignal)?;
        Self::new(signals)
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.signals.contains(&signal)
    }

    /// True when a metadata call is needed (timestamp or size enabled).
    pub fn uses_stat(&self) -> bool {
        self.contains(Signal::Timestamp) || self.contains(Signal::Size)
    }

    pub fn union(&self, other: &SignalPolicy) -> SignalPolicy {
        SignalPolicy {
            signals: self.signals.union(&other.signals).copied().collect(),
        }
    }

    /// Signals in `self` but not in `other`; fails if nothing would remain.
    pub fn difference(&self, other: &SignalPolicy) -> Result<SignalPolicy, MonrunError> {
        SignalPolicy::new(self.signals.difference(&other.signals).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.iter().copied()
    }
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self {
            signals: Signal::ALL.into_iter().collect(),
        }
    }
}

impl fmt::Display for SignalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Signal::as_str).collect();
        f.write_str(&names.join("+"))
    }
}
