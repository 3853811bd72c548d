use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::keys::IndicatorKey;

/// One fiscal year of indicator values.
///
/// All records in a dataset share the same key set; years are unique.
/// Comparative computations always use the two chronologically latest years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub year: i32,
    pub values: BTreeMap<IndicatorKey, f64>,
}

impl FinancialRecord {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: IndicatorKey) -> Option<f64> {
        self.values.get(&key).copied()
    }
}

/// Year-over-year movement of a single indicator.
///
/// `percentage` is `None` when the previous value is zero; the undefined
/// case is represented explicitly instead of leaking inf/NaN to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delta {
    pub key: IndicatorKey,
    pub previous_year: i32,
    pub current_year: i32,
    pub previous: f64,
    pub current: f64,
    pub absolute: f64,
    pub percentage: Option<f64>,
}

impl Delta {
    pub fn compute(
        key: IndicatorKey,
        previous_year: i32,
        current_year: i32,
        previous: f64,
        current: f64,
    ) -> Self {
        let absolute = current - previous;
        let percentage = if previous != 0.0 {
            Some(absolute / previous.abs() * 100.0)
        } else {
            None
        };
        Self {
            key,
            previous_year,
            current_year,
            previous,
            current,
            absolute,
            percentage,
        }
    }
}

/// Alert severity, ordered for display: critical first, informational last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Caution,
    Info,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Caution => "caution",
            Severity::Info => "info",
        }
    }
}

/// Benchmark-rule violation for the current year. Recomputed per request,
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub key: IndicatorKey,
    pub message: String,
    pub year: i32,
}

/// DuPont attribution of the ROE change to its multiplicative drivers.
///
/// The three percentage-point shares sum exactly to `total_roe_change_pp`.
/// When the log-ratio contributions cancel to zero the proportional split is
/// meaningless, so the degenerate case is a distinct variant rather than an
/// arbitrary 33/33/33-looking split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DuPontAttribution {
    Attributed {
        previous_year: i32,
        current_year: i32,
        margin_pp: f64,
        turnover_pp: f64,
        leverage_pp: f64,
        total_roe_change_pp: f64,
    },
    Undefined {
        previous_year: i32,
        current_year: i32,
        reason: String,
    },
}
