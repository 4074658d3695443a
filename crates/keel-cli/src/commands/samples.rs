use crate::cli::GlobalFlags;
use crate::output::output;

/// Example questions the bundled policy corpus can answer.
pub const SAMPLE_QUERIES: [&str; 7] = [
    "What strategies promote economic diversification in regions?",
    "How can manufacturing contribute to regional resilience?",
    "What are the main challenges for rural economic development?",
    "How do urban areas build economic resilience?",
    "What role does workforce development play in regional resilience?",
    "How can regions improve access to capital for small businesses?",
    "What infrastructure investments support economic competitiveness?",
];

/// Handle `keel samples`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&SAMPLE_QUERIES, flags.format)
}
