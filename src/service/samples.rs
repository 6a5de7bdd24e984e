//! Built-in result sets for the smoke-test and demo routes

use super::prompt::SubmittedResult;

/// Query summarized by `POST /test`.
pub const SMOKE_TEST_QUERY: &str = "what is artificial intelligence";

fn result(title: &str, url: &str, snippet: &str) -> SubmittedResult {
    SubmittedResult {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
    }
}

/// Two fixed results about AI, enough to exercise the Ollama path end to end.
#[must_use]
pub fn smoke_test_results() -> Vec<SubmittedResult> {
    vec![
        result(
            "Artificial Intelligence - Wikipedia",
            "https://en.wikipedia.org/wiki/Artificial_intelligence",
            "Artificial intelligence (AI) is intelligence demonstrated by machines, as opposed to \
             natural intelligence displayed by animals including humans.",
        ),
        result(
            "What is AI? Artificial Intelligence Explained",
            "https://www.ibm.com/topics/artificial-intelligence",
            "AI enables computers and machines to simulate human intelligence and problem-solving \
             capabilities.",
        ),
    ]
}

/// (title, url, snippet template); `{query}` is substituted per request.
const DEMO_RESULTS: [(&str, &str, &str); 4] = [
    (
        "Quantum Computing Breakthroughs Explained",
        "https://example.com/quantum-breakthroughs",
        "A research roundup describing the most notable advances in quantum computing over the past \
         year, including improved qubit stability, expanded error correction, and new demonstrations \
         of quantum advantage for scientific simulations. Tailored for the query \"{query}\".",
    ),
    (
        "Industry Impact of Recent Quantum Milestones",
        "https://example.com/industry-impact",
        "Covers how hyperscalers and startups are productizing the latest discoveries, with practical \
         notes on what the \"{query}\" topic means for cloud APIs, post-quantum cryptography, and \
         hardware roadmaps.",
    ),
    (
        "Academic Papers to Watch",
        "https://example.com/academic-tracker",
        "A curated watch list of peer-reviewed papers aligned with \"{query}\". Includes summaries of \
         breakthroughs in topological qubits, neutral-atom arrays, and benchmarking research.",
    ),
    (
        "What Comes Next in Quantum",
        "https://example.com/future-outlook",
        "Forward-looking analysis outlining expected milestones for 2026-2028, plus the key open \
         challenges researchers must solve to fully realize the promise of \"{query}\".",
    ),
];

/// Static demo results tailored to `query`.
#[must_use]
pub fn demo_results(query: &str) -> Vec<SubmittedResult> {
    DEMO_RESULTS
        .iter()
        .map(|(title, url, snippet)| result(title, url, &snippet.replace("{query}", query)))
        .collect()
}
