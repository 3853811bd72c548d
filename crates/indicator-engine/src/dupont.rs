//! DuPont decomposition: ROE = Net Margin x Asset Turnover x Leverage
//! Multiplier. The relative ROE change between two years is attributed to
//! the three factors via their log-ratios, then scaled onto the signed
//! percentage-point change in ROE so the three shares sum to the total.

use indicator_core::{AnalysisError, AnalysisResult, DuPontAttribution, IndicatorKey};
use table_preparer::PreparedTable;

/// Log-ratio contribution of one factor. A first-order approximation of
/// multiplicative attribution that breaks down for sign changes, so
/// zero/negative inputs count as zero contribution instead of erroring.
fn log_contribution(previous: f64, current: f64) -> f64 {
    if previous > 0.0 && current > 0.0 {
        (current / previous).ln()
    } else {
        0.0
    }
}

/// Attribute the year-over-year ROE change to margin, turnover and leverage.
///
/// The three percentage-point shares of an `Attributed` result sum to the
/// total ROE change in percentage points. When the log contributions cancel
/// to exactly zero the proportional split carries no information, so the
/// result is `Undefined` instead of an arbitrary-looking division.
pub fn attribute_roe(table: &PreparedTable) -> AnalysisResult<DuPontAttribution> {
    let (previous, current) = table.latest_two()?;

    let roe_prev = previous.get(IndicatorKey::ReturnOnEquity).ok_or_else(|| {
        AnalysisError::InvalidData(format!("ROE missing for year {}", previous.year))
    })?;
    let roe_cur = current.get(IndicatorKey::ReturnOnEquity).ok_or_else(|| {
        AnalysisError::InvalidData(format!("ROE missing for year {}", current.year))
    })?;

    let factor = |key: IndicatorKey| -> (f64, f64) {
        (
            previous.get(key).unwrap_or(0.0),
            current.get(key).unwrap_or(0.0),
        )
    };
    let (margin_prev, margin_cur) = factor(IndicatorKey::NetMargin);
    let (turnover_prev, turnover_cur) = factor(IndicatorKey::AssetTurnover);
    let (leverage_prev, leverage_cur) = factor(IndicatorKey::LeverageMultiplier);

    let margin_contrib = log_contribution(margin_prev, margin_cur);
    let turnover_contrib = log_contribution(turnover_prev, turnover_cur);
    let leverage_contrib = log_contribution(leverage_prev, leverage_cur);
    let total_contrib = margin_contrib + turnover_contrib + leverage_contrib;

    if total_contrib == 0.0 {
        return Ok(DuPontAttribution::Undefined {
            previous_year: previous.year,
            current_year: current.year,
            reason: "factor contributions cancel or are all zero; \
                     a proportional split would be meaningless"
                .to_string(),
        });
    }

    let total_roe_change_pp = (roe_cur - roe_prev) * 100.0;
    let share = |contrib: f64| total_roe_change_pp * (contrib / total_contrib);

    Ok(DuPontAttribution::Attributed {
        previous_year: previous.year,
        current_year: current.year,
        margin_pp: share(margin_contrib),
        turnover_pp: share(turnover_contrib),
        leverage_pp: share(leverage_contrib),
        total_roe_change_pp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_preparer::{prepare, RawCell, RawTable, YEAR_COLUMN};

    fn dupont_table(
        margin: (f64, f64),
        turnover: (f64, f64),
        leverage: (f64, f64),
        roe: (f64, f64),
    ) -> PreparedTable {
        let column = |name: &str, pair: (f64, f64)| {
            (
                name.to_string(),
                vec![RawCell::Number(pair.0), RawCell::Number(pair.1)],
            )
        };
        let raw = RawTable {
            columns: vec![
                column("Margem Líquida (ML)", margin),
                column("Giro do Ativo (GA)", turnover),
                column("Multiplicador de Alavancagem Financeira (MAF)", leverage),
                column("Rentabilidade do Patrimônio Líquido (ROE) ", roe),
                (
                    YEAR_COLUMN.to_string(),
                    vec![RawCell::Number(2023.0), RawCell::Number(2024.0)],
                ),
            ],
        };
        prepare(&raw).unwrap()
    }

    #[test]
    fn shares_sum_to_the_total_roe_change() {
        let table = dupont_table((0.07, 0.24), (0.45, 0.49), (3.2, 2.8), (0.10, 0.33));
        match attribute_roe(&table).unwrap() {
            DuPontAttribution::Attributed {
                margin_pp,
                turnover_pp,
                leverage_pp,
                total_roe_change_pp,
                ..
            } => {
                let sum = margin_pp + turnover_pp + leverage_pp;
                assert!((sum - total_roe_change_pp).abs() < 1e-9);
                assert!((total_roe_change_pp - 23.0).abs() < 1e-9);
            }
            other => panic!("expected attribution, got {:?}", other),
        }
    }

    #[test]
    fn rising_margin_gets_positive_share_of_a_rise() {
        let table = dupont_table((0.07, 0.24), (0.45, 0.45), (3.0, 3.0), (0.10, 0.33));
        match attribute_roe(&table).unwrap() {
            DuPontAttribution::Attributed {
                margin_pp,
                turnover_pp,
                leverage_pp,
                total_roe_change_pp,
                ..
            } => {
                // Only the margin moved, so it absorbs the entire change.
                assert!((margin_pp - total_roe_change_pp).abs() < 1e-9);
                assert!(turnover_pp.abs() < 1e-9);
                assert!(leverage_pp.abs() < 1e-9);
            }
            other => panic!("expected attribution, got {:?}", other),
        }
    }

    #[test]
    fn non_positive_factor_contributes_zero() {
        let table = dupont_table((-0.05, 0.10), (0.45, 0.49), (3.0, 3.1), (0.02, 0.08));
        match attribute_roe(&table).unwrap() {
            DuPontAttribution::Attributed {
                margin_pp,
                turnover_pp,
                leverage_pp,
                total_roe_change_pp,
                ..
            } => {
                assert!(margin_pp.abs() < 1e-12);
                let sum = margin_pp + turnover_pp + leverage_pp;
                assert!((sum - total_roe_change_pp).abs() < 1e-9);
            }
            other => panic!("expected attribution, got {:?}", other),
        }
    }

    #[test]
    fn all_flat_factors_are_undefined_not_a_split() {
        let table = dupont_table((0.10, 0.10), (0.50, 0.50), (2.0, 2.0), (0.10, 0.10));
        assert!(matches!(
            attribute_roe(&table).unwrap(),
            DuPontAttribution::Undefined { .. }
        ));
    }

    #[test]
    fn single_year_is_insufficient_data() {
        let raw = RawTable {
            columns: vec![
                (
                    "Rentabilidade do Patrimônio Líquido (ROE) ".to_string(),
                    vec![RawCell::Number(0.10)],
                ),
                (YEAR_COLUMN.to_string(), vec![RawCell::Number(2024.0)]),
            ],
        };
        let table = prepare(&raw).unwrap();
        assert!(matches!(
            attribute_roe(&table),
            Err(AnalysisError::InsufficientData(_))
        ));
    }
}
