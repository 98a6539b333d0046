use crate::domain::models::ExtractReport;
use crate::error::ExtractError;
use crate::services::model_client::ModelClient;
use crate::services::repair::{RepairChain, CONTROLS_KEY, POLICY_NAME_KEY};
use crate::services::schema::SchemaStore;
use crate::services::storage::{policy_output_path, save_json};
use crate::services::validate::parse_and_validate;
use serde_json::Value;
use std::path::PathBuf;

pub const POLICY_PLACEHOLDER: &str = "<<<POLICY>>>";
pub const BUILTIN_PROMPT: &str = include_str!("../../assets/policy_extract.txt");

pub fn render_prompt(template: &str, policy_text: &str) -> String {
    if template.contains(POLICY_PLACEHOLDER) {
        template.replace(POLICY_PLACEHOLDER, policy_text)
    } else {
        log::warn!("prompt template has no {POLICY_PLACEHOLDER}; appending policy text");
        format!("{template}\n\n{policy_text}")
    }
}

/// Model call -> strict validation -> one repair pass -> re-validation -> file.
pub struct PolicyExtractor<C: ModelClient> {
    client: C,
    schema: SchemaStore,
    repairs: RepairChain,
    prompt_template: String,
    out_dir: PathBuf,
}

impl<C: ModelClient> PolicyExtractor<C> {
    pub fn new(client: C, schema: SchemaStore, prompt_template: String, out_dir: PathBuf) -> Self {
        Self {
            client,
            schema,
            repairs: RepairChain::default(),
            prompt_template,
            out_dir,
        }
    }

    pub fn extract(
        &self,
        policy_text: &str,
        display_name: &str,
    ) -> Result<ExtractReport, ExtractError> {
        let prompt = render_prompt(&self.prompt_template, policy_text);
        log::info!("requesting policy rules for '{display_name}'");
        let raw = self.client.complete(&prompt)?;
        log::debug!("model returned {} bytes", raw.len());

        let (obj, strategy) = self.resolve(&raw, display_name)?;
        let path = save_json(&obj, &policy_output_path(&self.out_dir, display_name))?;
        log::info!("policy JSON written to {}", path.display());

        Ok(ExtractReport {
            policy_name: obj
                .get(POLICY_NAME_KEY)
                .and_then(Value::as_str)
                .unwrap_or(display_name)
                .to_string(),
            path: path.to_string_lossy().to_string(),
            controls: obj
                .get(CONTROLS_KEY)
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0),
            repair_strategy: strategy.map(str::to_string),
        })
    }

    /// Validated policy object plus the repair that produced it, if any.
    /// Whatever is returned has passed the schema.
    pub fn resolve(
        &self,
        raw: &str,
        fallback_name: &str,
    ) -> Result<(Value, Option<&'static str>), ExtractError> {
        match parse_and_validate(raw, &self.schema) {
            Ok(obj) => Ok((obj, None)),
            Err(strict) if strict.is_recoverable() => {
                log::warn!("strict validation failed, attempting repair: {strict}");
                let repaired = self.repairs.repair(raw, fallback_name)?;
                self.schema.validate(&repaired.value)?;
                Ok((repaired.value, repaired.strategy))
            }
            Err(e) => Err(e),
        }
    }
}
