use indicator_core::{Alert, IndicatorKey, Severity};
use table_preparer::PreparedTable;

use crate::deltas::year_over_year;

/// Deterministic one-line summary of the latest year-over-year movement.
///
/// Assembled from the ROE and Net Margin percentage changes, the Overall
/// Indebtedness change, the current-year Current Ratio and the count of
/// critical alerts. Parts are joined with "; " and terminated with a
/// period. Returns `None` when nothing is computable (e.g. a single year
/// of data); an empty narrative is never emitted.
pub fn narrative(table: &PreparedTable, alerts: &[Alert]) -> Option<String> {
    let deltas = year_over_year(table).ok()?;
    let delta_pct = |key: IndicatorKey| {
        deltas
            .iter()
            .find(|d| d.key == key)
            .and_then(|d| d.percentage)
    };

    let mut parts: Vec<String> = Vec::new();

    if let Some(pct) = delta_pct(IndicatorKey::ReturnOnEquity) {
        let direction = if pct >= 0.0 { "increase" } else { "decline" };
        parts.push(format!("ROE {} of {:.1}%", direction, pct.abs()));
    }
    if let Some(pct) = delta_pct(IndicatorKey::NetMargin) {
        let direction = if pct >= 0.0 { "up" } else { "down" };
        parts.push(format!("net margin {} {:.1}%", direction, pct.abs()));
    }
    if let Some(pct) = delta_pct(IndicatorKey::OverallIndebtedness) {
        let direction = if pct >= 0.0 { "rose" } else { "fell" };
        parts.push(format!("overall indebtedness {} {:.1}%", direction, pct.abs()));
    }
    if let Some(delta) = deltas.iter().find(|d| d.key == IndicatorKey::CurrentRatio) {
        parts.push(format!("current ratio at {:.2}", delta.current));
    }

    let critical_count = alerts
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();
    if critical_count > 0 && !parts.is_empty() {
        let plural = if critical_count == 1 { "alert" } else { "alerts" };
        parts.push(format!("{} critical {}", critical_count, plural));
    }

    if parts.is_empty() {
        return None;
    }
    Some(format!("{}.", parts.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_alerts;
    use table_preparer::{prepare, RawCell, RawTable, YEAR_COLUMN};

    fn two_year_table(columns: &[(&str, f64, f64)]) -> PreparedTable {
        let mut raw = RawTable::default();
        for (name, prev, cur) in columns {
            raw.columns.push((
                name.to_string(),
                vec![RawCell::Number(*prev), RawCell::Number(*cur)],
            ));
        }
        raw.columns.push((
            YEAR_COLUMN.to_string(),
            vec![RawCell::Number(2023.0), RawCell::Number(2024.0)],
        ));
        prepare(&raw).unwrap()
    }

    #[test]
    fn narrative_joins_parts_and_ends_with_a_period() {
        let table = two_year_table(&[
            ("Rentabilidade do Patrimônio Líquido (ROE) ", 0.10, 0.33),
            ("Margem Líquida (ML)", 0.07, 0.24),
            ("Endividamento Geral (EG)", 0.67, 0.64),
            ("Liquidez Corrente (LC) ", 0.69, 0.96),
        ]);
        let alerts = evaluate_alerts(&table).unwrap();
        let text = narrative(&table, &alerts).unwrap();
        assert!(text.starts_with("ROE increase of 230.0%"));
        assert!(text.contains("; net margin up"));
        assert!(text.contains("overall indebtedness fell 4.5%"));
        assert!(text.contains("current ratio at 0.96"));
        assert!(text.ends_with('.'));
    }

    #[test]
    fn critical_alerts_are_counted() {
        let table = two_year_table(&[
            ("Rentabilidade do Patrimônio Líquido (ROE) ", 0.33, 0.10),
            ("Liquidez Corrente (LC) ", 1.1, 0.95),
        ]);
        let alerts = evaluate_alerts(&table).unwrap();
        let text = narrative(&table, &alerts).unwrap();
        assert!(text.contains("2 critical alerts"));
    }

    #[test]
    fn single_year_yields_no_narrative() {
        let raw = RawTable {
            columns: vec![
                (
                    "Liquidez Corrente (LC) ".to_string(),
                    vec![RawCell::Number(0.96)],
                ),
                (YEAR_COLUMN.to_string(), vec![RawCell::Number(2024.0)]),
            ],
        };
        let table = prepare(&raw).unwrap();
        assert_eq!(narrative(&table, &[]), None);
    }

    #[test]
    fn no_computable_parts_yields_none_not_empty() {
        let table = two_year_table(&[("Ativo Total", 1.0, 2.0)]);
        assert_eq!(narrative(&table, &[]), None);
    }
}
