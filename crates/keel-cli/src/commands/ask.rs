use keel_rag::OpenAiClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `keel ask`. Missing credentials fail before the corpus is indexed.
pub async fn handle(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let llm = ctx.config.llm.require()?;
    let model = OpenAiClient::from_config(llm)?;
    let service = ctx.policy_service(args.corpus.as_deref(), model)?;
    let answer = service.ask(&args.query).await?;
    output(&answer, flags.format)
}
