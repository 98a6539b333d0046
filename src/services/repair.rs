//! Shape repairs for model output that parsed but failed the schema.
//!
//! Repairs only move or rename a title; they never invent `controls`.
//! Anything no strategy can fix is passed through so the caller's
//! re-validation reports the real schema violation.

use crate::error::ExtractError;
use crate::services::validate::parse_model_json;
use serde_json::{Map, Value};

pub const POLICY_NAME_KEY: &str = "policy_name";
pub const CONTROLS_KEY: &str = "controls";

/// One known model failure mode and how to reshape it.
pub trait RepairStrategy {
    fn name(&self) -> &'static str;

    /// Reshaped object when this repair applies, `None` otherwise.
    fn apply(&self, obj: &Map<String, Value>, fallback_name: &str) -> Option<Map<String, Value>>;
}

/// `{"<Policy Title>": "<anything>", "controls": [...]}`: the lone
/// string-valued key *name* is the title. Its value is dropped.
pub struct TitleKeyAsName;

impl RepairStrategy for TitleKeyAsName {
    fn name(&self) -> &'static str {
        "title_key_as_name"
    }

    fn apply(&self, obj: &Map<String, Value>, _fallback_name: &str) -> Option<Map<String, Value>> {
        let controls = obj.get(CONTROLS_KEY)?;
        let candidates = title_candidates(obj);
        let [title] = candidates.as_slice() else {
            return None;
        };
        let mut fixed = Map::new();
        fixed.insert(POLICY_NAME_KEY.to_string(), Value::String(title.to_string()));
        fixed.insert(CONTROLS_KEY.to_string(), controls.clone());
        Some(fixed)
    }
}

/// `controls` present but no unambiguous title: use the caller's name.
pub struct InjectFallbackName;

impl RepairStrategy for InjectFallbackName {
    fn name(&self) -> &'static str {
        "inject_fallback_name"
    }

    fn apply(&self, obj: &Map<String, Value>, fallback_name: &str) -> Option<Map<String, Value>> {
        if !obj.contains_key(CONTROLS_KEY) {
            return None;
        }
        let mut fixed = obj.clone();
        fixed.insert(
            POLICY_NAME_KEY.to_string(),
            Value::String(fallback_name.to_string()),
        );
        Some(fixed)
    }
}

/// Keys other than `controls` whose value is a string.
fn title_candidates(obj: &Map<String, Value>) -> Vec<&str> {
    obj.iter()
        .filter(|(k, v)| k.as_str() != CONTROLS_KEY && v.is_string())
        .map(|(k, _)| k.as_str())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Repaired {
    pub value: Value,
    pub strategy: Option<&'static str>,
}

/// Ordered repairs; the first one that applies wins.
pub struct RepairChain {
    strategies: Vec<Box<dyn RepairStrategy>>,
}

impl Default for RepairChain {
    fn default() -> Self {
        Self::new(vec![Box::new(TitleKeyAsName), Box::new(InjectFallbackName)])
    }
}

impl RepairChain {
    pub fn new(strategies: Vec<Box<dyn RepairStrategy>>) -> Self {
        Self { strategies }
    }

    /// Re-parse `raw` and reshape it. Syntax errors are propagated, not repaired.
    /// The result is NOT validated; that is the caller's job.
    pub fn repair(&self, raw: &str, fallback_name: &str) -> Result<Repaired, ExtractError> {
        let data = parse_model_json(raw)?;
        let obj = match data {
            Value::Object(obj) => obj,
            other => {
                log::debug!("model output is not a JSON object; nothing to repair");
                return Ok(Repaired {
                    value: other,
                    strategy: None,
                });
            }
        };

        if obj.contains_key(POLICY_NAME_KEY) {
            return Ok(Repaired {
                value: Value::Object(obj),
                strategy: None,
            });
        }

        for strategy in &self.strategies {
            if let Some(fixed) = strategy.apply(&obj, fallback_name) {
                log::info!("repaired model output with {}", strategy.name());
                return Ok(Repaired {
                    value: Value::Object(fixed),
                    strategy: Some(strategy.name()),
                });
            }
        }

        log::warn!("no repair applies (missing `{CONTROLS_KEY}`); passing output through");
        Ok(Repaired {
            value: Value::Object(obj),
            strategy: None,
        })
    }
}
