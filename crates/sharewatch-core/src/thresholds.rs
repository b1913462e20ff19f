//! Row-count thresholds and run severity.

use serde::{Deserialize, Serialize};

/// Ascending warning/critical row-count limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Counts at or above this are at least [`Severity::Warning`].
    #[serde(default = "default_warning")]
    pub warning: u64,

    /// Counts at or above this are [`Severity::Critical`].
    #[serde(default = "default_critical")]
    pub critical: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: default_warning(),
            critical: default_critical(),
        }
    }
}

impl Thresholds {
    /// Classify a total row count. Advisory only; never blocks a run.
    pub fn classify(&self, count: u64) -> Severity {
        if count >= self.critical {
            Severity::Critical
        } else if count >= self.warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

fn default_warning() -> u64 {
    100
}

fn default_critical() -> u64 {
    500
}

/// Severity classification of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries_are_exact() {
        let thresholds = Thresholds::default();

        assert_eq!(thresholds.classify(0), Severity::Normal);
        assert_eq!(thresholds.classify(99), Severity::Normal);
        assert_eq!(thresholds.classify(100), Severity::Warning);
        assert_eq!(thresholds.classify(499), Severity::Warning);
        assert_eq!(thresholds.classify(500), Severity::Critical);
        assert_eq!(thresholds.classify(10_000), Severity::Critical);
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let thresholds = Thresholds {
            warning: 1,
            critical: 2,
        };
        assert_eq!(thresholds.classify(0), Severity::Normal);
        assert_eq!(thresholds.classify(1), Severity::Warning);
        assert_eq!(thresholds.classify(2), Severity::Critical);
    }
}
