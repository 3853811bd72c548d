use serde::{Deserialize, Serialize};

use crate::keys::{IndicatorCategory, IndicatorKey};
use crate::types::Severity;

/// Fixed threshold rule attached to an indicator definition.
///
/// Level rules look at the current-year value; the remaining kinds compare
/// the two latest years. Ratio-valued indicators (margins, ROE) are stored
/// as fractions, so a percentage-point move is the raw difference times 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BenchmarkRule {
    /// Current value below `critical` is critical, below `caution` is
    /// caution, anything else is healthy. Critical is checked first.
    LevelBelow { critical: f64, caution: f64 },
    /// Year-over-year drop in raw value greater than `threshold`.
    DropExceeds { severity: Severity, threshold: f64 },
    /// Relative year-over-year increase greater than `threshold` percent.
    PercentIncreaseExceeds { severity: Severity, threshold: f64 },
    /// Drop measured in percentage points greater than `threshold`.
    PointDropExceeds { severity: Severity, threshold: f64 },
}

/// Static metadata for one indicator. Fixed lookup table, not derived from
/// data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    pub key: IndicatorKey,
    pub category: IndicatorCategory,
    pub benchmark: Option<BenchmarkRule>,
}

/// Benchmark rule table:
///
/// | Indicator                 | Critical     | Caution        |
/// |---------------------------|--------------|----------------|
/// | Current Ratio             | < 1.0        | < 1.2          |
/// | Cash Ratio (YoY drop)     | —            | drop > 0.10    |
/// | Overall Indebtedness      | —            | increase > 10% |
/// | Net Margin (pp change)    | drop > 2 pp  | —              |
/// | Return on Equity (pp)     | drop > 3 pp  | —              |
pub fn definition(key: IndicatorKey) -> IndicatorDefinition {
    let benchmark = match key {
        IndicatorKey::CurrentRatio => Some(BenchmarkRule::LevelBelow {
            critical: 1.0,
            caution: 1.2,
        }),
        IndicatorKey::CashRatio => Some(BenchmarkRule::DropExceeds {
            severity: Severity::Caution,
            threshold: 0.10,
        }),
        IndicatorKey::OverallIndebtedness => Some(BenchmarkRule::PercentIncreaseExceeds {
            severity: Severity::Caution,
            threshold: 10.0,
        }),
        IndicatorKey::NetMargin => Some(BenchmarkRule::PointDropExceeds {
            severity: Severity::Critical,
            threshold: 2.0,
        }),
        IndicatorKey::ReturnOnEquity => Some(BenchmarkRule::PointDropExceeds {
            severity: Severity::Critical,
            threshold: 3.0,
        }),
        _ => None,
    };
    IndicatorDefinition {
        key,
        category: key.category(),
        benchmark,
    }
}
