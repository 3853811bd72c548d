//! Deterministic prompt templates. The data context is embedded as
//! pretty-printed JSON; the remote model's reply is consumed verbatim.

use serde_json::Value;

/// Prompt for the automatic-insights button: no user question, the model
/// summarizes the dataset on its own.
pub fn build_insights_prompt(context: &Value) -> String {
    format!(
        "You are a senior financial analyst specialized in accounting \
         indicators. Analyze the data below and produce concise insights.\n\
         \n\
         DATA CONTEXT:\n{}\n\
         \n\
         Structure your answer as:\n\
         1. EXECUTIVE SUMMARY - three to four bullet points.\n\
         2. PROFITABILITY - ROE, net margin and the DuPont attribution; \
         explain which driver moved the result.\n\
         3. LIQUIDITY AND DEBT - current ratio against the 1.0/1.2 bands, \
         indebtedness trend.\n\
         4. ALERTS - restate any critical alerts with their numbers.\n\
         5. NEXT STEPS - up to three concrete actions.\n\
         \n\
         Rules: be concise (two or three lines per item), always cite the \
         concrete numeric values from the context, and say so explicitly \
         when the context lacks the data to answer a point.",
        pretty(context)
    )
}

/// Prompt for a specific user question about the data.
pub fn build_question_prompt(context: &Value, question: &str) -> String {
    format!(
        "You are an assistant specialized in financial-statement analysis. \
         Answer the user's question strictly from the data provided.\n\
         \n\
         USER QUESTION:\n{}\n\
         \n\
         DATA CONTEXT:\n{}\n\
         \n\
         Structure your answer as:\n\
         1. DIRECT ANSWER - two or three lines.\n\
         2. RELEVANT FIGURES - the specific values and years used.\n\
         3. DETAIL - short justification for each point.\n\
         \n\
         Rules: be concise, cite concrete values, use the year-over-year \
         deltas for comparisons, and state clearly when the data is \
         insufficient to answer.",
        question,
        pretty(context)
    )
}

/// Canned follow-up questions offered next to the chat box.
pub fn suggested_questions() -> Vec<&'static str> {
    vec![
        "Which driver explains most of the ROE change?",
        "Is the liquidity position adequate for the current year?",
        "How did overall indebtedness evolve year over year?",
        "Which indicators deteriorated the most?",
        "What should management prioritize based on the critical alerts?",
    ]
}

fn pretty(context: &Value) -> String {
    serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string())
}
