use crate::cli::{ExtractArgs, SAMPLE_POLICY};
use crate::services::extract::{PolicyExtractor, BUILTIN_PROMPT};
use crate::services::model_client::{ModelConfig, OllamaClient};
use crate::services::output::emit;
use crate::services::schema::SchemaStore;
use anyhow::Context;
use std::time::Duration;

pub fn handle_extract(json: bool, args: &ExtractArgs) -> anyhow::Result<()> {
    let policy_text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read policy text from {}", path.display()))?,
        (None, None) => SAMPLE_POLICY.to_string(),
    };

    let schema = match &args.schema {
        Some(path) => SchemaStore::load(path)?,
        None => SchemaStore::builtin()?,
    };
    let prompt_template = match &args.prompt {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read prompt template {}", path.display()))?,
        None => BUILTIN_PROMPT.to_string(),
    };

    let client = OllamaClient::new(ModelConfig {
        host: args.host.clone(),
        model: args.model.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    })?;
    log::debug!("using model '{}' at {}", args.model, args.host);

    let extractor = PolicyExtractor::new(client, schema, prompt_template, args.out_dir.clone());
    let report = extractor.extract(&policy_text, &args.name)?;

    emit(json, &report, |r| {
        let mut lines = vec![format!("policy JSON: {}", r.path)];
        lines.push(format!("policy: {} ({} controls)", r.policy_name, r.controls));
        if let Some(strategy) = &r.repair_strategy {
            lines.push(format!("repaired: {strategy}"));
        }
        lines
    })
}
