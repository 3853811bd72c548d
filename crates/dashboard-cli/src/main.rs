//! dashboard-cli: Analyze a semicolon-delimited indicator table and print the
//! derived report, optionally asking the remote model about it.
//!
//! Usage:
//!   cargo run -p dashboard-cli -- indicadores.csv
//!   cargo run -p dashboard-cli -- indicadores.csv --insights
//!   cargo run -p dashboard-cli -- indicadores.csv --ask "How did ROE evolve?"
//!   cargo run -p dashboard-cli -- indicadores.csv --export clean.csv --export-deltas deltas.csv

use anyhow::Context;
use indicator_core::DuPontAttribution;
use indicator_engine::AnalysisReport;
use llm_context::{
    build_context, build_insights_prompt, build_question_prompt, suggested_questions, LlmClient,
};
use table_preparer::{export_deltas, export_prepared, load_prepared};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_cli=info,table_preparer=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let csv_path = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .cloned()
        .context("usage: dashboard-cli <indicators.csv> [--insights] [--ask <question>] [--export <path>] [--export-deltas <path>]")?;

    let want_insights = args.iter().any(|a| a == "--insights");
    let question = flag_value(&args, "--ask");
    let export_path = flag_value(&args, "--export");
    let export_deltas_path = flag_value(&args, "--export-deltas");

    let table = load_prepared(&csv_path)
        .with_context(|| format!("failed to load {csv_path}"))?;
    info!(
        records = table.records().len(),
        indicators = table.keys().len(),
        "table prepared"
    );

    let report = AnalysisReport::build(&table);
    print_report(&report);

    if let Some(path) = export_path {
        export_prepared(&table, &path)
            .with_context(|| format!("failed to export table to {path}"))?;
        println!("\nPrepared table written to {path}");
    }
    if let Some(path) = export_deltas_path {
        let deltas = report.deltas.as_deref().unwrap_or(&[]);
        export_deltas(deltas, &path)
            .with_context(|| format!("failed to export deltas to {path}"))?;
        println!("Deltas written to {path}");
    }

    if want_insights || question.is_some() {
        let client = LlmClient::from_env();
        if !client.is_available() {
            println!("\nLLM features need LLM_API_KEY. Questions you could ask once configured:");
            for q in suggested_questions() {
                println!("  - {q}");
            }
            return Ok(());
        }

        let context = build_context(&table, &report);
        if want_insights {
            match client.generate(&build_insights_prompt(&context)).await {
                Ok(text) => println!("\n=== Insights ===\n{text}"),
                Err(e) => println!("\nInsights unavailable: {e}"),
            }
        }
        if let Some(q) = question {
            match client.generate(&build_question_prompt(&context, &q)).await {
                Ok(text) => println!("\n=== Answer ===\n{text}"),
                Err(e) => println!("\nAnswer unavailable: {e}"),
            }
        }
    }

    Ok(())
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn print_report(report: &AnalysisReport) {
    println!("=== Analysis ===");
    println!(
        "Years: {}",
        report
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if let Some(kpis) = &report.kpis {
        println!("\nKPIs ({} -> {}):", kpis.previous_year, kpis.current_year);
        let rows = [
            ("Net revenue", &kpis.net_revenue),
            ("Net income", &kpis.net_income),
            ("ROE", &kpis.return_on_equity),
            ("ROA", &kpis.return_on_assets),
            ("Net margin", &kpis.net_margin),
            ("Current ratio", &kpis.current_ratio),
        ];
        for (label, entry) in rows {
            if let Some(e) = entry {
                let variation = e
                    .variation_pct
                    .map(|p| format!("{p:+.1}%"))
                    .unwrap_or_else(|| "n/a".to_string());
                println!("  {label}: {:.2} -> {:.2} ({variation})", e.previous, e.current);
            }
        }
    }

    if report.alerts.is_empty() {
        println!("\nNo benchmark alerts.");
    } else {
        println!("\nAlerts:");
        for alert in &report.alerts {
            println!("  [{}] {}", alert.severity.name(), alert.message);
        }
    }

    match &report.dupont {
        Some(DuPontAttribution::Attributed {
            margin_pp,
            turnover_pp,
            leverage_pp,
            total_roe_change_pp,
            ..
        }) => {
            println!("\nDuPont attribution of ROE change ({total_roe_change_pp:+.2} pp):");
            println!("  Net margin:          {margin_pp:+.2} pp");
            println!("  Asset turnover:      {turnover_pp:+.2} pp");
            println!("  Leverage multiplier: {leverage_pp:+.2} pp");
        }
        Some(DuPontAttribution::Undefined { reason, .. }) => {
            println!("\nDuPont attribution undefined: {reason}");
        }
        None => {}
    }

    if let Some(h) = &report.highlights {
        if !h.top_increases.is_empty() {
            println!("\nTop increases:");
            for d in &h.top_increases {
                if let Some(p) = d.percentage {
                    println!("  {}: {p:+.1}%", d.key.name());
                }
            }
        }
        if !h.top_decreases.is_empty() {
            println!("Top decreases:");
            for d in &h.top_decreases {
                if let Some(p) = d.percentage {
                    println!("  {}: {p:+.1}%", d.key.name());
                }
            }
        }
    }

    if let Some(narrative) = &report.narrative {
        println!("\nSummary: {narrative}");
    }
}
