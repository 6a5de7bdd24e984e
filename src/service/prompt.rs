//! Prompt construction for result summaries

use serde::{Deserialize, Serialize};

use crate::utils::{MAX_RESULT_LENGTH, safe_truncate_chars};

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant that summarizes web search results.
Your task is to analyze search results and provide a concise, informative summary.

Guidelines:
- Be concise and factual
- Highlight the most relevant information
- Organize information logically
- Use bullet points when appropriate
- Cite key findings from the results
- Keep the summary under 300 words
";

/// One result as submitted to `POST /summarize`.
///
/// Missing fields get placeholders instead of rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedResult {
    #[serde(default = "no_title")]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "no_snippet")]
    pub snippet: String,
}

fn no_title() -> String {
    "No title".to_string()
}

fn no_snippet() -> String {
    "No snippet".to_string()
}

/// Numbered result list, one block per result.
#[must_use]
pub fn format_results(results: &[SubmittedResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            format!(
                "{}. **{}**\n   {}\n   Source: {}\n",
                i + 1,
                result.title,
                safe_truncate_chars(&result.snippet, MAX_RESULT_LENGTH),
                result.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full user prompt for `query`.
#[must_use]
pub fn build_prompt(query: &str, results: &[SubmittedResult]) -> String {
    format!(
        "Based on these search results for the query \"{query}\", provide a comprehensive summary:

Search Results:
{results}

Please provide:
1. A brief overview (2-3 sentences)
2. Key findings or main points (3-5 bullet points)
3. Any important nuances or caveats

Summary:",
        results = format_results(results),
    )
}
