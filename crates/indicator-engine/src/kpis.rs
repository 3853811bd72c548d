use indicator_core::{AnalysisResult, Delta, IndicatorKey};
use serde::{Deserialize, Serialize};
use table_preparer::PreparedTable;

/// Headline value pair for one dashboard card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiEntry {
    pub previous: f64,
    pub current: f64,
    /// Relative change in percent; `None` when the previous value is zero.
    pub variation_pct: Option<f64>,
}

impl KpiEntry {
    fn from_pair(previous: f64, current: f64) -> Self {
        let variation_pct = if previous != 0.0 {
            Some((current - previous) / previous.abs() * 100.0)
        } else {
            None
        };
        Self {
            previous,
            current,
            variation_pct,
        }
    }
}

/// The six headline KPIs shown at the top of the dashboard. An entry is
/// `None` when the dataset lacks that indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    pub previous_year: i32,
    pub current_year: i32,
    pub net_revenue: Option<KpiEntry>,
    pub net_income: Option<KpiEntry>,
    pub return_on_equity: Option<KpiEntry>,
    pub return_on_assets: Option<KpiEntry>,
    pub net_margin: Option<KpiEntry>,
    pub current_ratio: Option<KpiEntry>,
}

pub fn kpi_summary(table: &PreparedTable) -> AnalysisResult<KpiSummary> {
    let (previous, current) = table.latest_two()?;

    let entry = |key: IndicatorKey| -> Option<KpiEntry> {
        Some(KpiEntry::from_pair(previous.get(key)?, current.get(key)?))
    };

    Ok(KpiSummary {
        previous_year: previous.year,
        current_year: current.year,
        net_revenue: entry(IndicatorKey::NetRevenue),
        net_income: entry(IndicatorKey::NetIncome),
        return_on_equity: entry(IndicatorKey::ReturnOnEquity),
        return_on_assets: entry(IndicatorKey::ReturnOnAssets),
        net_margin: entry(IndicatorKey::NetMargin),
        current_ratio: entry(IndicatorKey::CurrentRatio),
    })
}

/// Largest movers across all indicators, by percentage variation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlights {
    pub top_increases: Vec<Delta>,
    pub top_decreases: Vec<Delta>,
}

/// Top-3 gainers and decliners, matching the dashboard's automatic
/// highlights section. Deltas with an undefined percentage are skipped.
pub fn highlights(deltas: &[Delta]) -> Highlights {
    let mut defined: Vec<&Delta> = deltas.iter().filter(|d| d.percentage.is_some()).collect();
    defined.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_increases = defined.iter().take(3).map(|d| (*d).clone()).collect();
    let top_decreases = defined.iter().rev().take(3).map(|d| (*d).clone()).collect();

    Highlights {
        top_increases,
        top_decreases,
    }
}
