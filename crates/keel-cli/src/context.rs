use std::path::Path;

use anyhow::Context;
use keel_config::KeelConfig;
use keel_rag::{Disabled, LanguageModel};
use keel_search::Index;
use keel_service::{KeelService, load_index};

/// Loaded configuration plus constructors for the services commands need.
pub struct AppContext {
    pub config: KeelConfig,
}

impl AppContext {
    #[must_use]
    pub const fn new(config: KeelConfig) -> Self {
        Self { config }
    }

    /// A service for score commands: no corpus, no model.
    pub fn scoring_service(&self) -> anyhow::Result<KeelService<Disabled>> {
        Ok(KeelService::new(&self.config, Index::default(), Disabled)?)
    }

    /// A service over the corpus at `corpus`, or `retrieval.corpus_dir`.
    pub fn policy_service<M: LanguageModel>(
        &self,
        corpus: Option<&str>,
        model: M,
    ) -> anyhow::Result<KeelService<M>> {
        let dir = corpus.unwrap_or(&self.config.retrieval.corpus_dir);
        let index = load_index(Path::new(dir))
            .with_context(|| format!("failed to index policy corpus '{dir}'"))?;
        Ok(KeelService::new(&self.config, index, model)?)
    }
}
