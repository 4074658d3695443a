use std::path::Path;

use anyhow::Context;
use keel_core::table::write_score_table;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::commands::shared::source::load_indicators;
use crate::context::AppContext;
use crate::output::output;

/// Handle `keel score`: rescore the whole indicator table and replace the score table.
pub fn handle(args: &ScoreArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let batch = load_indicators(args.input.as_deref(), ctx)?;
    let board = ctx.scoring_service()?.get_scores(&batch)?;

    if args.dry_run {
        tracing::info!(metros = board.len(), "dry run, score table not written");
    } else {
        let path = args
            .output
            .as_deref()
            .unwrap_or(&ctx.config.general.scores_path);
        write_score_table(Path::new(path), board.records())
            .with_context(|| format!("failed to write score table '{path}'"))?;
        tracing::info!(path, metros = board.len(), "score table written");
    }

    output(&board, flags.format)
}
