use keel_core::passages::QueryResult;
use keel_rag::Disabled;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

/// One ranked passage, flattened for display.
#[derive(Debug, Serialize)]
struct SearchHit {
    rank: usize,
    score: f64,
    citation: String,
    passage: String,
    text: String,
}

fn hits(result: &QueryResult) -> Vec<SearchHit> {
    result
        .ranked
        .iter()
        .enumerate()
        .map(|(idx, ranked)| SearchHit {
            rank: idx + 1,
            score: ranked.score,
            citation: ranked.passage.citation.clone(),
            passage: ranked.passage.id.to_string(),
            text: ranked.passage.text.clone(),
        })
        .collect()
}

/// Handle `keel search`. Ranking only; the model is never called.
pub fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = ctx.policy_service(args.corpus.as_deref(), Disabled)?;
    let result = service.search(&args.query, flags.limit)?;
    output(&hits(&result), flags.format)
}
