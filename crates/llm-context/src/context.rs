//! JSON-safe context assembly for prompt injection.
//!
//! The structure is hint-only for the remote model and carries no invariant
//! beyond "always valid JSON": no NaN or infinities (replaced by null),
//! dates as DD/MM/YYYY strings, list-valued fields capped to bound prompt
//! size.

use std::collections::BTreeMap;

use chrono::Local;
use indicator_core::{IndicatorCategory, ALL_KEYS};
use indicator_engine::AnalysisReport;
use serde_json::{json, Map, Value};
use table_preparer::PreparedTable;

/// Cap applied to list-valued fields (rankings, alerts) before
/// serialization.
pub const LIST_CAP: usize = 5;

/// Serialize the prepared rows plus the derived report into the structure
/// embedded in prompts.
pub fn build_context(table: &PreparedTable, report: &AnalysisReport) -> Value {
    let records: Vec<Value> = table
        .records()
        .iter()
        .map(|record| {
            let mut values = Map::new();
            values.insert("year".to_string(), json!(record.year));
            for (key, value) in &record.values {
                values.insert(key.name().to_string(), json!(value));
            }
            Value::Object(values)
        })
        .collect();

    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for key in ALL_KEYS {
        if key.category() == IndicatorCategory::Structural {
            continue;
        }
        groups.entry(key.category().name()).or_default().push(key.name());
    }

    let context = json!({
        "general": {
            "generated_at": Local::now().format("%d/%m/%Y").to_string(),
            "analyzed_years": report.years,
            "total_records": table.records().len(),
            "total_indicators": table.keys().len(),
        },
        "indicator_groups": groups,
        "records": records,
        "kpis": report.kpis,
        "deltas": report.deltas,
        "alerts": cap_list(json!(report.alerts)),
        "dupont": report.dupont,
        "highlights": report.highlights.as_ref().map(|h| json!({
            "top_increases": cap_list(json!(h.top_increases)),
            "top_decreases": cap_list(json!(h.top_decreases)),
        })),
        "narrative": report.narrative,
    });

    json_safe(context)
}

fn cap_list(value: Value) -> Value {
    match value {
        Value::Array(mut items) => {
            items.truncate(LIST_CAP);
            Value::Array(items)
        }
        other => other,
    }
}

/// Recursively replace anything JSON cannot represent. serde_json already
/// maps non-finite floats to null on serialization; this pass makes the
/// guarantee explicit for values assembled by hand.
pub fn json_safe(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => Value::Null,
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(json_safe).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, json_safe(v)))
                .collect(),
        ),
        other => other,
    }
}
