use std::collections::BTreeMap;

use indicator_core::{AnalysisError, FinancialRecord, IndicatorKey};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PrepareError, PrepareResult};
use crate::locale::{parse_locale_number, parse_year, FALLBACK_YEAR};

/// Header of the fiscal-year column in the source files.
pub const YEAR_COLUMN: &str = "Ano";

/// A cell before normalization. Cells that are already numeric pass through
/// untouched, which is what makes preparation idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawCell {
    Text(String),
    Number(f64),
}

/// An unnormalized table: column name -> cells, as read from the source
/// file. Every column except the year column is a candidate numeric column.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<(String, Vec<RawCell>)>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, cells)| cells.len())
    }
}

/// Normalized, year-sorted dataset. Immutable session context: built once,
/// threaded explicitly through every engine entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedTable {
    records: Vec<FinancialRecord>,
}

impl PreparedTable {
    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn keys(&self) -> Vec<IndicatorKey> {
        self.records
            .first()
            .map(|r| r.values.keys().copied().collect())
            .unwrap_or_default()
    }

    /// The two chronologically latest distinct years, previous then current.
    ///
    /// This is the universal precondition of every comparative computation:
    /// with fewer than two distinct years it reports insufficient data
    /// instead of defaulting to zeros.
    pub fn latest_two(&self) -> Result<(&FinancialRecord, &FinancialRecord), AnalysisError> {
        let current = self.records.last().ok_or_else(|| {
            AnalysisError::InsufficientData("dataset has no records".to_string())
        })?;
        let previous = self
            .records
            .iter()
            .rev()
            .find(|r| r.year < current.year)
            .ok_or_else(|| {
                AnalysisError::InsufficientData(format!(
                    "only one distinct year ({}) present",
                    current.year
                ))
            })?;
        Ok((previous, current))
    }

    /// Convert back to a raw numeric table (used by export and by the
    /// idempotence guarantee: preparing the result is a no-op).
    pub fn to_raw(&self) -> RawTable {
        let keys = self.keys();
        let mut columns: Vec<(String, Vec<RawCell>)> = keys
            .iter()
            .map(|k| {
                let cells = self
                    .records
                    .iter()
                    .map(|r| RawCell::Number(r.get(*k).unwrap_or(0.0)))
                    .collect();
                (k.source_label().to_string(), cells)
            })
            .collect();
        columns.push((
            YEAR_COLUMN.to_string(),
            self.records
                .iter()
                .map(|r| RawCell::Number(r.year as f64))
                .collect(),
        ));
        RawTable { columns }
    }
}

/// Normalize a raw table into a [`PreparedTable`].
///
/// Per-cell failure policy: a malformed numeric cell degrades to zero and is
/// logged, never propagated; an entirely unparseable column therefore comes
/// out all-zero. Year cells that cannot be coerced take the fallback year.
/// Rows come out sorted ascending by year.
pub fn prepare(raw: &RawTable) -> PrepareResult<PreparedTable> {
    if raw.columns.is_empty() || raw.row_count() == 0 {
        return Err(PrepareError::EmptyTable(
            "raw table has no rows".to_string(),
        ));
    }

    let year_cells = raw
        .columns
        .iter()
        .find(|(name, _)| name.trim() == YEAR_COLUMN)
        .map(|(_, cells)| cells.as_slice())
        .ok_or_else(|| PrepareError::MissingYearColumn(YEAR_COLUMN.to_string()))?;

    let years: Vec<i32> = year_cells
        .iter()
        .map(|cell| match cell {
            RawCell::Number(n) if n.is_finite() => *n as i32,
            RawCell::Number(_) => {
                warn!("non-finite year cell, defaulting to {}", FALLBACK_YEAR);
                FALLBACK_YEAR
            }
            RawCell::Text(s) => parse_year(s).unwrap_or_else(|| {
                warn!(cell = %s, "unparseable year cell, defaulting to {}", FALLBACK_YEAR);
                FALLBACK_YEAR
            }),
        })
        .collect();

    let mut records: Vec<FinancialRecord> = years.iter().map(|y| FinancialRecord::new(*y)).collect();

    for (name, cells) in &raw.columns {
        if name.trim() == YEAR_COLUMN {
            continue;
        }
        let Some(key) = IndicatorKey::from_raw(name) else {
            warn!(column = %name, "unrecognized indicator column, skipping");
            continue;
        };
        for (row, cell) in cells.iter().enumerate() {
            if row >= records.len() {
                break;
            }
            let value = match cell {
                RawCell::Number(n) if n.is_finite() => *n,
                RawCell::Number(_) => 0.0,
                RawCell::Text(s) => parse_locale_number(s).unwrap_or_else(|| {
                    warn!(column = %name, cell = %s, "malformed numeric cell, degrading to 0");
                    0.0
                }),
            };
            records[row].values.insert(key, value);
        }
    }

    records.sort_by_key(|r| r.year);
    Ok(PreparedTable { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, cells: &[&str]) -> (String, Vec<RawCell>) {
        (
            name.to_string(),
            cells.iter().map(|c| RawCell::Text(c.to_string())).collect(),
        )
    }

    fn sample_raw() -> RawTable {
        RawTable {
            columns: vec![
                text_column("Ativo Total", &["1.124.797", "1.050.888"]),
                text_column("Liquidez Corrente (LC) ", &["0,69", "0,96"]),
                text_column("Rentabilidade do Patrimônio Líquido (ROE) ", &["0,10", "0,33"]),
                text_column(YEAR_COLUMN, &["2024", "2023"]),
            ],
        }
    }

    #[test]
    fn converts_locale_columns_and_sorts_by_year() {
        let table = prepare(&sample_raw()).unwrap();
        assert_eq!(table.years(), vec![2023, 2024]);
        let first = &table.records()[0];
        assert_eq!(first.year, 2023);
        assert_eq!(first.get(IndicatorKey::TotalAssets), Some(1_050_888.0));
        assert_eq!(first.get(IndicatorKey::CurrentRatio), Some(0.96));
    }

    #[test]
    fn malformed_cells_degrade_to_zero() {
        let raw = RawTable {
            columns: vec![
                text_column("Ativo Total", &["garbage", "1.000"]),
                text_column(YEAR_COLUMN, &["2024", "2023"]),
            ],
        };
        let table = prepare(&raw).unwrap();
        assert_eq!(table.records()[1].get(IndicatorKey::TotalAssets), Some(0.0));
        assert_eq!(
            table.records()[0].get(IndicatorKey::TotalAssets),
            Some(1_000.0)
        );
    }

    #[test]
    fn entirely_unparseable_column_becomes_all_zero() {
        let raw = RawTable {
            columns: vec![
                text_column("Margem Líquida (ML)", &["??", "!!"]),
                text_column(YEAR_COLUMN, &["2024", "2023"]),
            ],
        };
        let table = prepare(&raw).unwrap();
        for record in table.records() {
            assert_eq!(record.get(IndicatorKey::NetMargin), Some(0.0));
        }
    }

    #[test]
    fn unparseable_years_take_fallback() {
        let raw = RawTable {
            columns: vec![
                text_column("Ativo Total", &["1,0", "2,0"]),
                text_column(YEAR_COLUMN, &["??", "??"]),
            ],
        };
        let table = prepare(&raw).unwrap();
        assert_eq!(table.years(), vec![FALLBACK_YEAR, FALLBACK_YEAR]);
        // Collided years make the two-year comparison impossible.
        assert!(matches!(
            table.latest_two(),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn preparation_is_idempotent_on_clean_data() {
        let once = prepare(&sample_raw()).unwrap();
        let twice = prepare(&once.to_raw()).unwrap();
        assert_eq!(once.years(), twice.years());
        for (a, b) in once.records().iter().zip(twice.records()) {
            assert_eq!(a.year, b.year);
            for key in once.keys() {
                let va = a.get(key).unwrap();
                let vb = b.get(key).unwrap();
                assert!((va - vb).abs() < 1e-12, "{key:?}: {va} vs {vb}");
            }
        }
    }

    #[test]
    fn latest_two_requires_two_distinct_years() {
        let raw = RawTable {
            columns: vec![
                text_column("Ativo Total", &["1,0"]),
                text_column(YEAR_COLUMN, &["2024"]),
            ],
        };
        let table = prepare(&raw).unwrap();
        assert!(matches!(
            table.latest_two(),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn latest_two_uses_chronologically_latest_pair() {
        let raw = RawTable {
            columns: vec![
                text_column("Ativo Total", &["1", "2", "3"]),
                text_column(YEAR_COLUMN, &["2022", "2024", "2023"]),
            ],
        };
        let table = prepare(&raw).unwrap();
        let (previous, current) = table.latest_two().unwrap();
        assert_eq!(previous.year, 2023);
        assert_eq!(current.year, 2024);
    }
}
