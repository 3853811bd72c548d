use indicator_core::{AnalysisResult, Delta};
use table_preparer::PreparedTable;

/// Year-over-year deltas for every indicator, over the two chronologically
/// latest years.
///
/// Requires two distinct years; with fewer this returns
/// `AnalysisError::InsufficientData` rather than zero-valued deltas, which
/// would be indistinguishable from "no change".
pub fn year_over_year(table: &PreparedTable) -> AnalysisResult<Vec<Delta>> {
    let (previous, current) = table.latest_two()?;

    let deltas = table
        .keys()
        .into_iter()
        .filter_map(|key| {
            let prev = previous.get(key)?;
            let cur = current.get(key)?;
            Some(Delta::compute(key, previous.year, current.year, prev, cur))
        })
        .collect();

    Ok(deltas)
}
