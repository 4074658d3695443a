use anyhow::Context;
use keel_config::KeelConfig;

/// Load layered config (`.env`, config files, `KEEL_*` env) and validate it.
pub fn load_config() -> anyhow::Result<KeelConfig> {
    let config = KeelConfig::load_with_dotenv().context("failed to load keel configuration")?;
    config.validate().context("invalid keel configuration")?;
    if !config.llm.is_configured() {
        tracing::debug!("no LLM credentials configured; `keel ask` will fail");
    }
    Ok(config)
}
