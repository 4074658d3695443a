use crate::cli::GlobalFlags;
use crate::cli::root_commands::CompareArgs;
use crate::commands::shared::source::load_scores;
use crate::context::AppContext;
use crate::output::output;

/// Handle `keel compare`.
pub fn handle(args: &CompareArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let board = load_scores(&args.source, ctx)?;
    let selected = board.compare(&args.metro_codes);
    if selected.is_empty() {
        anyhow::bail!(
            "none of the requested metros are in the score table: {}",
            args.metro_codes.join(", ")
        );
    }
    output(&selected, flags.format)
}
