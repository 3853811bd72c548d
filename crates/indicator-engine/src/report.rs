use indicator_core::{Alert, Delta, DuPontAttribution};
use serde::{Deserialize, Serialize};
use table_preparer::PreparedTable;
use tracing::warn;

use crate::alerts::evaluate_alerts;
use crate::deltas::year_over_year;
use crate::dupont::attribute_roe;
use crate::kpis::{highlights, kpi_summary, Highlights, KpiSummary};
use crate::narrative::narrative;

/// Everything the dashboard and the LLM context consume, computed in one
/// pass over the prepared table.
///
/// Every section is attempted speculatively and degrades independently: a
/// failed computation leaves its field empty and the rest intact, so one
/// broken indicator never blanks the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub years: Vec<i32>,
    pub deltas: Option<Vec<Delta>>,
    pub kpis: Option<KpiSummary>,
    pub alerts: Vec<Alert>,
    pub dupont: Option<DuPontAttribution>,
    pub highlights: Option<Highlights>,
    pub narrative: Option<String>,
}

impl AnalysisReport {
    pub fn build(table: &PreparedTable) -> Self {
        let deltas = match year_over_year(table) {
            Ok(d) => Some(d),
            Err(e) => {
                warn!(error = %e, "delta computation skipped");
                None
            }
        };

        let kpis = match kpi_summary(table) {
            Ok(k) => Some(k),
            Err(e) => {
                warn!(error = %e, "KPI summary skipped");
                None
            }
        };

        let alerts = match evaluate_alerts(table) {
            Ok(a) => a,
            Err(e) => {
                warn!(error = %e, "alert evaluation skipped");
                Vec::new()
            }
        };

        let dupont = match attribute_roe(table) {
            Ok(d) => Some(d),
            Err(e) => {
                warn!(error = %e, "DuPont attribution skipped");
                None
            }
        };

        let highlights = deltas.as_deref().map(highlights);
        let narrative = narrative(table, &alerts);

        Self {
            years: table.years(),
            deltas,
            kpis,
            alerts,
            dupont,
            highlights,
            narrative,
        }
    }
}
