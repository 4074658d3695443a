use crate::cli::GlobalFlags;
use crate::cli::root_commands::SourceArgs;
use crate::commands::shared::source::load_scores;
use crate::context::AppContext;
use crate::output::output;

/// Handle `keel summary`.
pub fn handle(args: &SourceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let board = load_scores(args, ctx)?;
    output(&board.summary(), flags.format)
}
