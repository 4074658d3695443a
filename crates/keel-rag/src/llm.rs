//! The language-model capability consumed by the synthesizer.

use std::future::Future;
use std::sync::Arc;

use crate::error::ProviderError;

/// Turns one prompt into one completion.
///
/// Implementations own transport, authentication and timeouts. The
/// synthesizer calls [`LanguageModel::answer`] at most once per request.
pub trait LanguageModel: Send + Sync {
    fn answer(&self, prompt: &str) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

impl<M: LanguageModel> LanguageModel for Arc<M> {
    fn answer(&self, prompt: &str) -> impl Future<Output = Result<String, ProviderError>> + Send {
        self.as_ref().answer(prompt)
    }
}

/// A model that always fails with [`ProviderError::NotConfigured`].
///
/// Lets scoring and search run without provider credentials; `ask` through
/// it surfaces as generation unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl LanguageModel for Disabled {
    async fn answer(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured(
            "no language model configured".to_string(),
        ))
    }
}
