//! Answer Synthesizer: budgeted context assembly, one model call, citations.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use keel_core::passages::{QueryResult, SynthesizedAnswer};

use crate::error::RagError;
use crate::llm::LanguageModel;

/// Answer returned without calling the model when nothing was retrieved.
pub const NO_RELEVANT_MATERIAL: &str =
    "I couldn't find relevant policy documents to answer your question.";

/// One passage admitted to the prompt, possibly truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPassage {
    pub document_id: String,
    pub citation: String,
    pub text: String,
    pub truncated: bool,
}

/// Take passages in rank order while their combined text fits in
/// `max_context_chars` (counted in `char`s).
///
/// Stops at the first passage that does not fit. If the top passage alone
/// exceeds the budget it is cut to the budget, so a non-empty ranking always
/// yields some context.
#[must_use]
pub fn assemble_context(ranked: &QueryResult, max_context_chars: usize) -> Vec<ContextPassage> {
    let mut context = Vec::new();
    let mut used = 0usize;

    for hit in &ranked.ranked {
        let passage = &hit.passage;
        let len = passage.text.chars().count();

        if used + len <= max_context_chars {
            used += len;
            context.push(ContextPassage {
                document_id: passage.id.document_id.clone(),
                citation: passage.citation.clone(),
                text: passage.text.clone(),
                truncated: false,
            });
            continue;
        }

        if context.is_empty() {
            context.push(ContextPassage {
                document_id: passage.id.document_id.clone(),
                citation: passage.citation.clone(),
                text: passage.text.chars().take(max_context_chars).collect(),
                truncated: true,
            });
        }
        break;
    }
    context
}

/// Distinct source documents in first-used order.
#[must_use]
pub fn citations(context: &[ContextPassage]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    context
        .iter()
        .filter(|p| seen.insert(p.document_id.as_str()))
        .map(|p| p.citation.clone())
        .collect()
}

/// Render the grounded prompt sent to the model.
#[must_use]
pub fn build_prompt(query: &str, context: &[ContextPassage]) -> String {
    let mut prompt = String::from(
        "You are a policy expert analyzing regional economic resilience.\n\n\
         Answer the question using only the policy passages below. Cite passages \
         by their bracketed number. If the passages do not contain enough \
         information to answer, say so explicitly instead of guessing.\n\n\
         Passages:\n",
    );
    for (n, passage) in context.iter().enumerate() {
        let _ = write!(
            prompt,
            "\n[{}] (source: {})\n{}\n",
            n + 1,
            passage.citation,
            passage.text
        );
    }
    let _ = write!(prompt, "\nQuestion: {query}\n");
    prompt
}

/// Produce a grounded answer for `query` from `ranked` passages.
///
/// Calls `model` exactly once when `ranked` is non-empty, and never when it
/// is empty. The model's output is returned verbatim.
///
/// # Errors
///
/// - [`RagError::InvalidBudget`] when `max_context_chars` is 0.
/// - [`RagError::GenerationUnavailable`] when the model call fails.
pub async fn synthesize<M: LanguageModel>(
    query: &str,
    ranked: &QueryResult,
    max_context_chars: usize,
    model: &M,
) -> Result<SynthesizedAnswer, RagError> {
    if max_context_chars == 0 {
        return Err(RagError::InvalidBudget);
    }

    if ranked.is_empty() {
        tracing::debug!(query, "no passages retrieved; skipping model call");
        return Ok(SynthesizedAnswer {
            query: query.to_string(),
            answer: NO_RELEVANT_MATERIAL.to_string(),
            citations: Vec::new(),
        });
    }

    let context = assemble_context(ranked, max_context_chars);
    let prompt = build_prompt(query, &context);
    tracing::debug!(
        query,
        passages = context.len(),
        truncated = context.iter().any(|p| p.truncated),
        "context assembled"
    );

    let answer = model.answer(&prompt).await.map_err(|e| {
        tracing::warn!(error = %e, "language model call failed");
        RagError::GenerationUnavailable(e)
    })?;

    Ok(SynthesizedAnswer {
        query: query.to_string(),
        answer,
        citations: citations(&context),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use keel_core::passages::{DocumentPassage, RankedPassage};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ProviderError;

    #[derive(Default)]
    struct RecordingModel {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl LanguageModel for RecordingModel {
        async fn answer(&self, prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(ProviderError::Timeout(30))
            } else {
                Ok("  grounded answer  ".to_string())
            }
        }
    }

    fn hit(doc: &str, idx: usize, text: &str, score: f64) -> RankedPassage {
        RankedPassage {
            passage: DocumentPassage::new(doc, idx, text, format!("Title {doc}")),
            score,
        }
    }

    fn ranked(hits: Vec<RankedPassage>) -> QueryResult {
        QueryResult {
            query: "q".into(),
            ranked: hits,
        }
    }

    #[tokio::test]
    async fn empty_ranking_never_calls_model() {
        let model = RecordingModel::default();
        let answer = synthesize("q", &QueryResult::empty("q"), 100, &model)
            .await
            .unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert_eq!(answer.answer, NO_RELEVANT_MATERIAL);
        assert!(answer.citations.is_empty());
    }

    #[tokio::test]
    async fn oversized_top_passage_is_truncated() {
        let model = RecordingModel::default();
        let long = "x".repeat(300);
        let result = ranked(vec![hit("big", 0, &long, 0.9), hit("other", 0, "short", 0.5)]);

        let answer = synthesize("q", &result, 100, &model).await.unwrap();

        assert_eq!(answer.citations, vec!["Title big"]);
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains(&"x".repeat(100)));
        assert!(!prompts[0].contains(&"x".repeat(101)));
        assert!(!prompts[0].contains("short"));
    }

    #[tokio::test]
    async fn model_called_once_and_output_verbatim() {
        let model = RecordingModel::default();
        let result = ranked(vec![hit("a", 0, "alpha", 0.9), hit("b", 0, "beta", 0.8)]);

        let answer = synthesize("what?", &result, 1_000, &model).await.unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(answer.answer, "  grounded answer  ");
        assert_eq!(answer.query, "what?");
    }

    #[tokio::test]
    async fn model_failure_is_generation_unavailable() {
        let model = RecordingModel {
            fail: true,
            ..RecordingModel::default()
        };
        let result = ranked(vec![hit("a", 0, "alpha", 0.9)]);

        let err = synthesize("q", &result, 100, &model).await.unwrap_err();
        assert!(matches!(err, RagError::GenerationUnavailable(ProviderError::Timeout(30))));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_budget_is_invalid() {
        let model = RecordingModel::default();
        let result = ranked(vec![hit("a", 0, "alpha", 0.9)]);
        assert!(matches!(
            synthesize("q", &result, 0, &model).await,
            Err(RagError::InvalidBudget)
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn context_stops_at_first_passage_that_does_not_fit() {
        let result = ranked(vec![
            hit("a", 0, &"a".repeat(40), 0.9),
            hit("b", 0, &"b".repeat(40), 0.8),
            hit("c", 0, &"c".repeat(30), 0.7),
            hit("d", 0, &"d".repeat(5), 0.6),
        ]);
        let context = assemble_context(&result, 100);
        let docs: Vec<&str> = context.iter().map(|p| p.document_id.as_str()).collect();
        assert_eq!(docs, vec!["a", "b"]);
        assert!(context.iter().all(|p| !p.truncated));
    }

    #[test]
    fn budget_counts_chars_not_bytes() {
        let result = ranked(vec![hit("a", 0, "é".repeat(10).as_str(), 0.9)]);
        let context = assemble_context(&result, 10);
        assert!(!context[0].truncated);
        assert_eq!(context[0].text.chars().count(), 10);
    }

    #[test]
    fn citations_are_distinct_in_first_use_order() {
        let result = ranked(vec![
            hit("b", 1, "one", 0.9),
            hit("a", 0, "two", 0.8),
            hit("b", 0, "three", 0.7),
        ]);
        let context = assemble_context(&result, 1_000);
        assert_eq!(citations(&context), vec!["Title b", "Title a"]);
    }

    #[test]
    fn prompt_tags_passages_with_sources() {
        let context = vec![ContextPassage {
            document_id: "rural".into(),
            citation: "Rural Development".into(),
            text: "Broadband grants.".into(),
            truncated: false,
        }];
        let prompt = build_prompt("How do rural areas grow?", &context);
        assert!(prompt.contains("[1] (source: Rural Development)\nBroadband grants."));
        assert!(prompt.contains("Question: How do rural areas grow?"));
        assert!(prompt.contains("say so explicitly"));
    }
}
