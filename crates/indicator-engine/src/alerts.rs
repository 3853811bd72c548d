use indicator_core::{
    definition, Alert, AnalysisResult, BenchmarkRule, IndicatorKey, Severity, ALL_KEYS,
};
use table_preparer::PreparedTable;

/// Evaluate the fixed benchmark rule table against the two latest years.
///
/// Rules are independent and all are evaluated; an indicator triggers at
/// most one alert (critical is checked before caution by construction of
/// the bands). The result is sorted critical-first for display.
pub fn evaluate_alerts(table: &PreparedTable) -> AnalysisResult<Vec<Alert>> {
    let (previous, current) = table.latest_two()?;

    let mut alerts = Vec::new();
    for key in ALL_KEYS {
        let Some(rule) = definition(*key).benchmark else {
            continue;
        };
        let (Some(prev), Some(cur)) = (previous.get(*key), current.get(*key)) else {
            continue;
        };
        if let Some(alert) = check_rule(*key, rule, prev, cur, current.year) {
            alerts.push(alert);
        }
    }

    alerts.sort_by_key(|a| a.severity);
    Ok(alerts)
}

fn check_rule(
    key: IndicatorKey,
    rule: BenchmarkRule,
    previous: f64,
    current: f64,
    year: i32,
) -> Option<Alert> {
    match rule {
        BenchmarkRule::LevelBelow { critical, caution } => {
            if current < critical {
                Some(Alert {
                    severity: Severity::Critical,
                    key,
                    message: format!(
                        "{} at {:.2}, below the critical floor of {:.1}",
                        key.name(),
                        current,
                        critical
                    ),
                    year,
                })
            } else if current < caution {
                Some(Alert {
                    severity: Severity::Caution,
                    key,
                    message: format!(
                        "{} at {:.2}, below the comfort level of {:.1}",
                        key.name(),
                        current,
                        caution
                    ),
                    year,
                })
            } else {
                None
            }
        }
        BenchmarkRule::DropExceeds {
            severity,
            threshold,
        } => {
            let drop = previous - current;
            (drop > threshold).then(|| Alert {
                severity,
                key,
                message: format!(
                    "{} fell {:.2} year over year ({:.2} to {:.2})",
                    key.name(),
                    drop,
                    previous,
                    current
                ),
                year,
            })
        }
        BenchmarkRule::PercentIncreaseExceeds {
            severity,
            threshold,
        } => {
            if previous == 0.0 {
                return None;
            }
            let increase = (current - previous) / previous.abs() * 100.0;
            (increase > threshold).then(|| Alert {
                severity,
                key,
                message: format!(
                    "{} up {:.1}% year over year ({:.2} to {:.2})",
                    key.name(),
                    increase,
                    previous,
                    current
                ),
                year,
            })
        }
        BenchmarkRule::PointDropExceeds {
            severity,
            threshold,
        } => {
            let drop_pp = (previous - current) * 100.0;
            (drop_pp > threshold).then(|| Alert {
                severity,
                key,
                message: format!("{} down {:.1} pp year over year", key.name(), drop_pp),
                year,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicator_core::AnalysisError;
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

    fn alerts_for(key: IndicatorKey, alerts: &[Alert]) -> Vec<&Alert> {
        alerts.iter().filter(|a| a.key == key).collect()
    }

    #[test]
    fn current_ratio_below_one_is_critical() {
        let table = two_year_table(&[("Liquidez Corrente (LC) ", 1.1, 0.95)]);
        let alerts = evaluate_alerts(&table).unwrap();
        let hits = alerts_for(IndicatorKey::CurrentRatio, &alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].severity, Severity::Critical);
        assert_eq!(hits[0].year, 2024);
        assert!(hits[0].message.contains("0.95"));
        assert!(hits[0].message.contains("1.0"));
    }

    #[test]
    fn current_ratio_below_comfort_is_one_caution_zero_critical() {
        let table = two_year_table(&[("Liquidez Corrente (LC) ", 1.1, 1.15)]);
        let alerts = evaluate_alerts(&table).unwrap();
        let hits = alerts_for(IndicatorKey::CurrentRatio, &alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].severity, Severity::Caution);
    }

    #[test]
    fn healthy_current_ratio_triggers_nothing() {
        let table = two_year_table(&[("Liquidez Corrente (LC) ", 1.4, 1.5)]);
        let alerts = evaluate_alerts(&table).unwrap();
        assert!(alerts_for(IndicatorKey::CurrentRatio, &alerts).is_empty());
    }

    #[test]
    fn net_margin_drop_over_two_points_is_critical() {
        // 3.5 pp drop on ratio-valued margin: 0.085 -> 0.050
        let table = two_year_table(&[("Margem Líquida (ML)", 0.085, 0.050)]);
        let alerts = evaluate_alerts(&table).unwrap();
        let hits = alerts_for(IndicatorKey::NetMargin, &alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].severity, Severity::Critical);
        assert!(hits[0].message.contains("3.5"));
    }

    #[test]
    fn roe_drop_over_three_points_is_critical() {
        let table = two_year_table(&[(
            "Rentabilidade do Patrimônio Líquido (ROE) ",
            0.33,
            0.28,
        )]);
        let alerts = evaluate_alerts(&table).unwrap();
        let hits = alerts_for(IndicatorKey::ReturnOnEquity, &alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].severity, Severity::Critical);
    }

    #[test]
    fn cash_ratio_drop_over_tenth_is_caution() {
        let table = two_year_table(&[("Liquidez Imediata (LI)", 0.45, 0.30)]);
        let alerts = evaluate_alerts(&table).unwrap();
        let hits = alerts_for(IndicatorKey::CashRatio, &alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].severity, Severity::Caution);
    }

    #[test]
    fn indebtedness_increase_over_ten_percent_is_caution() {
        let table = two_year_table(&[("Endividamento Geral (EG)", 0.60, 0.70)]);
        let alerts = evaluate_alerts(&table).unwrap();
        let hits = alerts_for(IndicatorKey::OverallIndebtedness, &alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].severity, Severity::Caution);
    }

    #[test]
    fn alerts_are_sorted_critical_first() {
        let table = two_year_table(&[
            ("Liquidez Imediata (LI)", 0.45, 0.30),
            ("Liquidez Corrente (LC) ", 1.1, 0.95),
        ]);
        let alerts = evaluate_alerts(&table).unwrap();
        assert!(alerts.len() >= 2);
        assert_eq!(alerts[0].severity, Severity::Critical);
    }

    #[test]
    fn single_year_is_insufficient_data() {
        let mut raw = RawTable::default();
        raw.columns.push((
            "Liquidez Corrente (LC) ".to_string(),
            vec![RawCell::Number(0.5)],
        ));
        raw.columns
            .push((YEAR_COLUMN.to_string(), vec![RawCell::Number(2024.0)]));
        let table = prepare(&raw).unwrap();
        assert!(matches!(
            evaluate_alerts(&table),
            Err(AnalysisError::InsufficientData(_))
        ));
    }
}
