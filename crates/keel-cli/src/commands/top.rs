use crate::cli::GlobalFlags;
use crate::cli::root_commands::TopArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::source::load_scores;
use crate::context::AppContext;
use crate::output::output;

/// Handle `keel top`.
pub fn handle(args: &TopArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(args.count, flags.limit, ctx.config.general.default_limit);
    let board = load_scores(&args.source, ctx)?;
    output(&board.top(limit, args.metric), flags.format)
}
