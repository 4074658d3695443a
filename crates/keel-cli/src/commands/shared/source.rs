use std::path::Path;

use anyhow::Context;
use keel_core::indicators::MetroIndicatorRecord;
use keel_core::table::{read_indicator_table, read_score_table};
use keel_scoring::ScoreBoard;

use crate::cli::root_commands::SourceArgs;
use crate::context::AppContext;

/// Read the indicator table at `input`, or at `general.indicators_path`.
pub fn load_indicators(
    input: Option<&str>,
    ctx: &AppContext,
) -> anyhow::Result<Vec<MetroIndicatorRecord>> {
    let path = input.unwrap_or(&ctx.config.general.indicators_path);
    read_indicator_table(Path::new(path))
        .with_context(|| format!("failed to load indicator table '{path}'"))
}

/// Scores for read-only commands: a saved score table when `--scores` is
/// given, otherwise a fresh recompute of the indicator table.
pub fn load_scores(source: &SourceArgs, ctx: &AppContext) -> anyhow::Result<ScoreBoard> {
    if let Some(path) = source.scores.as_deref() {
        let rows = read_score_table(Path::new(path))
            .with_context(|| format!("failed to load score table '{path}'"))?;
        tracing::debug!(path, rows = rows.len(), "using saved score table");
        return Ok(ScoreBoard::from(rows));
    }

    let batch = load_indicators(source.input.as_deref(), ctx)?;
    Ok(ctx.scoring_service()?.get_scores(&batch)?)
}
