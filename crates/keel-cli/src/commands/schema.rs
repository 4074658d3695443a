use keel_core::indicators::MetroIndicatorRecord;
use keel_core::passages::{DocumentPassage, SynthesizedAnswer};
use keel_core::scores::ResilienceScoreRecord;
use schemars::Schema;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};

/// JSON schema for one published type.
#[must_use]
pub fn schema_for(type_name: SchemaType) -> Schema {
    match type_name {
        SchemaType::Indicators => schemars::schema_for!(MetroIndicatorRecord),
        SchemaType::Scores => schemars::schema_for!(ResilienceScoreRecord),
        SchemaType::Passage => schemars::schema_for!(DocumentPassage),
        SchemaType::Answer => schemars::schema_for!(SynthesizedAnswer),
    }
}

/// Handle `keel schema`. Always pretty JSON, whatever `--format` says.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for(args.type_name);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
