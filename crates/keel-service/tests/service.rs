//! Facade behavior with a stub language model.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use keel_config::KeelConfig;
use keel_core::indicators::{MetroIndicatorRecord, names};
use keel_core::passages::DocumentPassage;
use keel_rag::{Disabled, LanguageModel, NO_RELEVANT_MATERIAL, ProviderError, RagError};
use keel_search::{Index, build_index};
use keel_service::{KeelService, ServiceError, load_index};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct StubModel {
    calls: AtomicUsize,
    last_prompt: Mutex<String>,
}

impl LanguageModel for StubModel {
    async fn answer(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = prompt.to_string();
        Ok("Invest in supplier networks [1].".to_string())
    }
}

fn metro(code: &str, unemployment: f64, income: f64) -> MetroIndicatorRecord {
    let record = MetroIndicatorRecord::new(code, format!("Metro {code}"))
        .with(names::MEDIAN_HOUSEHOLD_INCOME, income)
        .with(names::INCOME_GROWTH, 0.03)
        .with(names::UNEMPLOYMENT_RATE, unemployment)
        .with(names::EMPLOYMENT_VOLATILITY, 0.04)
        .with(names::BACHELORS_SHARE, 0.35)
        .with(names::GRADUATE_SHARE, 0.15);
    names::SECTOR_SHARES
        .iter()
        .fold(record, |r, name| r.with(*name, 1.0 / 6.0))
}

fn batch() -> Vec<MetroIndicatorRecord> {
    vec![
        metro("35620", 4.1, 91_000.0),
        metro("31080", 5.2, 83_000.0),
        metro("16980", 4.8, 78_000.0),
    ]
}

fn corpus() -> Vec<DocumentPassage> {
    vec![
        DocumentPassage::new(
            "manufacturing",
            0,
            "Manufacturing supplier networks build regional resilience.",
            "Manufacturing",
        ),
        DocumentPassage::new(
            "rural",
            0,
            "Rural broadband expands market access.",
            "Rural",
        ),
    ]
}

fn service<M: LanguageModel>(index: Index, model: M) -> KeelService<M> {
    KeelService::new(&KeelConfig::default(), index, model).unwrap()
}

#[test]
fn get_scores_and_compare_share_one_batch() {
    let svc = service(Index::default(), Disabled);

    let board = svc.get_scores(&batch()).unwrap();
    assert_eq!(board.len(), 3);

    let compared = svc.compare(&batch(), ["16980", "35620"]).unwrap();
    let codes: Vec<&str> = compared.iter().map(|r| r.metro_code.as_str()).collect();
    assert_eq!(codes, vec!["35620", "16980"]);
    assert_eq!(compared[0], *board.get("35620").unwrap());
}

#[test]
fn inconsistent_batch_is_rejected_wholesale() {
    let svc = service(Index::default(), Disabled);
    let mut records = batch();
    records[2].indicators.remove(names::GRADUATE_SHARE);
    assert!(matches!(
        svc.get_scores(&records),
        Err(ServiceError::Scoring(_))
    ));
}

#[tokio::test]
async fn ask_grounds_answer_in_retrieved_passages() {
    let svc = service(build_index(corpus()), StubModel::default());

    let answer = svc.ask("How does manufacturing support resilience?").await.unwrap();

    assert_eq!(answer.answer, "Invest in supplier networks [1].");
    assert_eq!(answer.citations, vec!["Manufacturing"]);

    let model = svc.model();
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    let prompt = model.last_prompt.lock().unwrap();
    assert!(prompt.contains("(source: Manufacturing)"));
    assert!(!prompt.contains("broadband"));
}

#[tokio::test]
async fn ask_without_relevant_passages_skips_model() {
    let model = std::sync::Arc::new(StubModel::default());
    let svc = service(build_index(corpus()), std::sync::Arc::clone(&model));

    let answer = svc.ask("quantum spaceflight").await.unwrap();

    assert_eq!(answer.answer, NO_RELEVANT_MATERIAL);
    assert!(answer.citations.is_empty());
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ask_reports_unavailable_model() {
    let svc = service(build_index(corpus()), Disabled);
    let err = svc.ask("manufacturing resilience").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Rag(RagError::GenerationUnavailable(ProviderError::NotConfigured(_)))
    ));
}

#[test]
fn replace_index_leaves_old_snapshot_intact() {
    let mut svc = service(build_index(corpus()), Disabled);
    let before = svc.index();

    svc.replace_index(vec![DocumentPassage::new(
        "housing",
        0,
        "Housing affordability programs.",
        "Housing",
    )]);

    assert_eq!(before.len(), 2);
    assert_eq!(svc.index().len(), 1);
    assert!(svc.search("manufacturing", None).unwrap().is_empty());
    assert_eq!(svc.search("housing", None).unwrap().len(), 1);
}

#[test]
fn search_uses_configured_top_k() {
    let svc = service(build_index(corpus()), Disabled);
    assert_eq!(svc.search("resilience broadband", None).unwrap().len(), 2);
    assert_eq!(svc.search("resilience broadband", Some(1)).unwrap().len(), 1);
    assert!(matches!(
        svc.search("resilience", Some(0)),
        Err(ServiceError::Search(_))
    ));
}

#[test]
fn load_index_reads_directory() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("capital_access.txt"), "Revolving loan funds.").unwrap();
    let index = load_index(tmp.path()).unwrap();
    assert_eq!(index.passages()[0].citation, "Capital Access");

    assert!(load_index(&tmp.path().join("missing")).is_err());
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = KeelConfig::default();
    config.retrieval.max_context_chars = 0;
    assert!(matches!(
        KeelService::new(&config, Index::default(), Disabled),
        Err(ServiceError::Config(_))
    ));
}
