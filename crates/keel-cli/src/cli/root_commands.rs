use clap::{Args, Subcommand, ValueEnum};
use keel_core::scores::ScoreMetric;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Score the indicator table and write the score table.
    Score(ScoreArgs),
    /// Scores for selected metros, in table order.
    Compare(CompareArgs),
    /// Highest-scoring metros by composite or a sub-component.
    Top(TopArgs),
    /// Batch statistics and category distribution.
    Summary(SourceArgs),
    /// Rank policy passages for a query.
    Search(SearchArgs),
    /// Answer a policy question from the indexed corpus.
    Ask(AskArgs),
    /// Dump JSON schema for a table row or result type.
    Schema(SchemaArgs),
    /// Print sample policy questions.
    Samples,
}

/// Where scores come from: recomputed from indicators, or a saved score table.
#[derive(Clone, Debug, Default, Args)]
pub struct SourceArgs {
    /// Indicator table (JSONL). Defaults to `general.indicators_path`.
    #[arg(long)]
    pub input: Option<String>,
    /// Read a previously written score table instead of rescoring.
    #[arg(long, conflicts_with = "input")]
    pub scores: Option<String>,
}

/// Arguments for `keel score`.
#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// Indicator table (JSONL). Defaults to `general.indicators_path`.
    #[arg(long)]
    pub input: Option<String>,
    /// Score table destination. Defaults to `general.scores_path`.
    #[arg(long)]
    pub output: Option<String>,
    /// Print scores without writing the score table.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `keel compare`.
#[derive(Clone, Debug, Args)]
pub struct CompareArgs {
    /// Metro (CBSA) codes to compare.
    #[arg(required = true)]
    pub metro_codes: Vec<String>,
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `keel top`.
#[derive(Clone, Debug, Args)]
pub struct TopArgs {
    /// `composite` or a sub-component name.
    #[arg(long, default_value = "composite")]
    pub metric: ScoreMetric,
    /// How many metros to list. Overrides the global `--limit`.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `keel search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    /// Corpus directory. Defaults to `retrieval.corpus_dir`.
    #[arg(long)]
    pub corpus: Option<String>,
}

/// Arguments for `keel ask`.
#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    pub query: String,
    /// Corpus directory. Defaults to `retrieval.corpus_dir`.
    #[arg(long)]
    pub corpus: Option<String>,
}

/// Types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Indicators,
    Scores,
    Passage,
    Answer,
}

/// Arguments for `keel schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
