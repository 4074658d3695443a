use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Score(args) => commands::score::handle(&args, ctx, flags),
        Commands::Compare(args) => commands::compare::handle(&args, ctx, flags),
        Commands::Top(args) => commands::top::handle(&args, ctx, flags),
        Commands::Summary(args) => commands::summary::handle(&args, ctx, flags),
        Commands::Search(args) => commands::search::handle(&args, ctx, flags),
        Commands::Ask(args) => commands::ask::handle(&args, ctx, flags).await,
        Commands::Schema(_) | Commands::Samples => {
            unreachable!("schema/samples are pre-dispatched in main")
        }
    }
}
